use tracing::trace;

use super::graph::CallGraph;
use super::resolver::NameResolver;
use crate::error::Result;
use crate::parsers::common::SyntaxNode;
use crate::parsers::extractor::AstExtractor;
use crate::parsers::python::ImportedModule;

/// Builds the call graph local to one source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallGraphBuilder {
    extractor: AstExtractor,
}

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self {
            extractor: AstExtractor::new(),
        }
    }

    /// One node per function, one edge per distinct caller/callee pair.
    ///
    /// Callees are added on demand, so calls into other files or libraries
    /// produce nodes with no content.
    pub fn build<N: SyntaxNode>(
        &self,
        functions: &[N],
        source: &[u8],
        module_name: Option<&str>,
        imports: &[ImportedModule],
    ) -> Result<CallGraph> {
        let names = functions
            .iter()
            .map(|function| self.extractor.function_name(function, source))
            .collect::<Result<Vec<_>>>()?;
        let resolver = NameResolver::new(module_name, names.iter().copied(), imports);

        let mut graph = CallGraph::new();
        for (function, name) in functions.iter().zip(&names) {
            let caller = resolver.qualify(name);
            graph.define(&caller, self.extractor.definition_text(function, source));

            for call in self.extractor.call_sites(function) {
                let callee = self.extractor.callee_text(&call, source);
                let resolution = resolver.resolve(callee);
                trace!(caller = %caller, callee, resolved = resolution.is_resolved(), "call site");
                graph.add_edge(&caller, resolution.qualified_name());
            }
        }

        Ok(graph)
    }
}
