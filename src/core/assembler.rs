use std::collections::BTreeMap;
use tracing::info;

use super::graph::{CallGraph, FileGraph};
use super::scanner::{FileFailure, ScanReport};
use crate::parsers::ParsedFile;

/// The two project-wide graphs plus the per-file results they came from.
#[derive(Debug, Default)]
pub struct ProjectGraphs {
    pub file_graph: FileGraph,
    pub call_graph: CallGraph,
    pub files: BTreeMap<String, ParsedFile>,
    pub failures: Vec<FileFailure>,
}

impl ProjectGraphs {
    /// The file-level graph and the full call graph.
    pub fn into_graphs(self) -> (FileGraph, CallGraph) {
        (self.file_graph, self.call_graph)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectAssembler;

impl ProjectAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, report: ScanReport) -> ProjectGraphs {
        let file_graph = self.file_graph(&report.files);
        let call_graph = self.merge(report.files.values().map(|file| &file.local_call_graph));
        info!(
            files = file_graph.node_count(),
            file_edges = file_graph.edge_count(),
            functions = call_graph.node_count(),
            calls = call_graph.edge_count(),
            "assembled project graphs"
        );
        ProjectGraphs {
            file_graph,
            call_graph,
            files: report.files,
            failures: report.failures,
        }
    }

    /// Edge `a -> b` whenever one of `a`'s imports names `b`'s module stem.
    ///
    /// Compares every ordered pair of files, which is fine for projects of a
    /// few thousand files.
    pub fn file_graph(&self, files: &BTreeMap<String, ParsedFile>) -> FileGraph {
        let mut graph = FileGraph::new();
        for path in files.keys() {
            graph.add_node(path);
        }
        for (path, file) in files {
            for (other_path, other) in files {
                if path != other_path && file.imports_file(other) {
                    graph.add_edge(path, other_path);
                }
            }
        }
        graph
    }

    /// Union of the given call graphs.
    ///
    /// Node and edge sets do not depend on input order. Relies on qualified
    /// names to keep same-named functions of different modules apart.
    pub fn merge<'a, I>(&self, graphs: I) -> CallGraph
    where
        I: IntoIterator<Item = &'a CallGraph>,
    {
        let mut merged = CallGraph::new();
        for graph in graphs {
            merged.merge(graph);
        }
        merged
    }
}
