//! # callweave
//!
//! Call graph and file dependency extraction for polyglot source trees.
//!
//! Each recognized source file is parsed with tree-sitter. Function
//! definitions, call sites and imports are extracted, callee names are
//! resolved syntactically against the file's own functions and imports, and
//! the per-file call graphs are merged into one project-wide graph next to a
//! file-level import graph.
//!
//! ```no_run
//! use callweave::{scan, ProjectSource};
//!
//! let graphs = scan(&ProjectSource::local("path/to/project"), 3).unwrap();
//! for (caller, callee) in graphs.call_graph.edges() {
//!     println!("{caller} -> {callee}");
//! }
//! ```
//!
//! ## Resolution
//!
//! Names are qualified as `<module>.<function>` where the module is the file's
//! root-relative path joined by dots. Calls that match neither a local
//! function nor an import stay unqualified.

pub mod config;
pub mod core;
pub mod error;
pub mod parsers;

use std::path::Path;

pub use crate::config::ScanConfig;
pub use crate::core::{
    CallGraph, FileGraph, GraphSnapshot, ProjectAnalyzer, ProjectGraphs, ProjectSource, RemoteFile,
};
pub use crate::error::{Error, Result};
pub use crate::parsers::language::{Language, LanguageRegistry};
pub use crate::parsers::{FileParser, ParsedFile};

/// Scan `source` with the default registry and tree-sitter grammars.
pub fn scan(source: &ProjectSource, max_depth: usize) -> Result<ProjectGraphs> {
    ProjectAnalyzer::new(ScanConfig::default().with_max_depth(max_depth)).analyze(source)
}

/// Parse one file. Without a module name, function names stay unqualified.
pub fn parse_file(path: &Path, source: &[u8], module_name: Option<&str>) -> Result<ParsedFile> {
    FileParser::default().parse_file(path, source, module_name)
}
