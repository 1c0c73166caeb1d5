pub mod analyzer;
pub mod assembler;
pub mod builder;
pub mod graph;
pub mod resolver;
pub mod scanner;

pub use analyzer::ProjectAnalyzer;
pub use assembler::{ProjectAssembler, ProjectGraphs};
pub use builder::CallGraphBuilder;
pub use graph::{CallGraph, FileGraph, GraphSnapshot, NamedGraph, Node};
pub use resolver::{NameResolver, Resolution};
pub use scanner::{FileEntry, FileFailure, ProjectScanner, ProjectSource, RemoteFile, ScanReport};
