use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A graph node keyed by its name, with an optional source-text attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub content: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Simple directed graph over uniquely named nodes.
///
/// Adding a node twice returns the existing index and adding an edge twice
/// keeps a single edge, so repeated calls between two functions collapse.
#[derive(Debug, Clone, Default)]
pub struct NamedGraph {
    graph: DiGraph<Node, ()>,
    node_map: HashMap<String, NodeIndex>,
}

/// Call graph over qualified function names.
pub type CallGraph = NamedGraph;

/// Import dependency graph over root-relative file paths.
pub type FileGraph = NamedGraph;

impl NamedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, inserting a bare node if absent.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            return index;
        }
        let index = self.graph.add_node(Node::new(name));
        self.node_map.insert(name.to_string(), index);
        index
    }

    /// Insert or update `name` with its content attribute.
    pub fn define(&mut self, name: &str, content: &str) -> NodeIndex {
        let index = self.add_node(name);
        self.graph[index].content = Some(content.to_string());
        index
    }

    pub fn add_edge(&mut self, source: &str, target: &str) {
        let source = self.add_node(source);
        let target = self.add_node(target);
        self.graph.update_edge(source, target, ());
    }

    /// Fold `other` into this graph. Content already present is kept.
    pub fn merge(&mut self, other: &NamedGraph) {
        for node in other.graph.node_weights() {
            let index = self.add_node(&node.name);
            if self.graph[index].content.is_none() {
                self.graph[index].content = node.content.clone();
            }
        }
        for (source, target) in other.edges() {
            self.add_edge(source, target);
        }
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_map.get(source), self.node_map.get(target)) {
            (Some(&source), Some(&target)) => self.graph.contains_edge(source, target),
            _ => false,
        }
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_map.get(name).map(|&index| &self.graph[index])
    }

    pub fn content(&self, name: &str) -> Option<&str> {
        self.node(name).and_then(|node| node.content.as_deref())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|node| node.name.as_str())
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].name.as_str(),
                self.graph[edge.target()].name.as_str(),
            )
        })
    }

    /// Names of the nodes `name` points to.
    pub fn successors(&self, name: &str) -> Vec<&str> {
        let Some(&index) = self.node_map.get(name) else {
            return Vec::new();
        };
        self.graph
            .neighbors(index)
            .map(|neighbor| self.graph[neighbor].name.as_str())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Underlying petgraph graph, for algorithms and exporters.
    pub fn as_petgraph(&self) -> &DiGraph<Node, ()> {
        &self.graph
    }

    /// Sorted node and edge lists, independent of insertion order.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<Node> = self.graph.node_weights().cloned().collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        let mut edges: Vec<(String, String)> = self
            .edges()
            .map(|(source, target)| (source.to_string(), target.to_string()))
            .collect();
        edges.sort();
        GraphSnapshot { nodes, edges }
    }
}

/// Order-independent view of a graph, the hand-off format for exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<(String, String)>,
}

impl GraphSnapshot {
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.name.as_str()).collect()
    }

    /// Same nodes and edges, ignoring node content.
    pub fn same_structure(&self, other: &GraphSnapshot) -> bool {
        self.node_names() == other.node_names() && self.edges == other.edges
    }
}
