pub mod common;
pub mod extractor;
pub mod language;
pub mod python;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::core::builder::CallGraphBuilder;
use crate::core::graph::CallGraph;
use crate::core::resolver::qualify;
use crate::error::{Error, Result};
use common::{line_at, SyntaxNode, SyntaxTreeProvider, TreeSitterProvider};
use extractor::AstExtractor;
use language::{Language, LanguageRegistry};
use python::ImportedModule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub qualified_name: String,
    pub byte_range: Range<usize>,
    pub line_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub called_name: String,
    pub byte_range: Range<usize>,
    pub line_number: usize,
}

/// Everything extracted from one source file.
///
/// The syntax tree itself is dropped once this is built.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub module_name: Option<String>,
    pub language: Language,
    pub imported_modules: Vec<ImportedModule>,
    pub function_definitions: Vec<FunctionDefinition>,
    pub call_sites: Vec<CallSite>,
    pub local_call_graph: CallGraph,
    /// `receiver -> [method]` for attribute calls. Not used by graph assembly.
    pub module_call_map: BTreeMap<String, Vec<String>>,
}

impl ParsedFile {
    /// File name without its final extension: `pkg/foo.test.py` -> `foo.test`.
    pub fn module_stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("")
    }

    /// Whether any of this file's imports names `other`'s module stem.
    pub fn imports_file(&self, other: &ParsedFile) -> bool {
        let stem = other.module_stem();
        self.imported_modules
            .iter()
            .any(|import| import.names_component(stem))
    }
}

/// Per-file pipeline: syntax tree, extraction, local call graph.
#[derive(Clone)]
pub struct FileParser {
    registry: Arc<LanguageRegistry>,
    provider: Arc<dyn SyntaxTreeProvider>,
    extractor: AstExtractor,
    builder: CallGraphBuilder,
}

impl FileParser {
    pub fn new(registry: Arc<LanguageRegistry>, provider: Arc<dyn SyntaxTreeProvider>) -> Self {
        Self {
            registry,
            provider,
            extractor: AstExtractor::new(),
            builder: CallGraphBuilder::new(),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn parse_file(
        &self,
        path: &Path,
        source: &[u8],
        module_name: Option<&str>,
    ) -> Result<ParsedFile> {
        let language = self
            .registry
            .language_for_path(path)
            .ok_or_else(|| Error::UnsupportedExtension(path.to_path_buf()))?;
        if !self.provider.supports(language) {
            return Err(Error::GrammarUnavailable(language));
        }

        let tree = self
            .provider
            .parse(language, source)
            .map_err(|err| Error::Parse {
                path: path.to_path_buf(),
                source: err,
            })?;
        let parsed = self.extract(path, language, &tree.root_node(), source, module_name)?;

        debug!(
            path = %path.display(),
            language = %language,
            functions = parsed.function_definitions.len(),
            calls = parsed.call_sites.len(),
            imports = parsed.imported_modules.len(),
            "parsed file"
        );
        Ok(parsed)
    }

    /// Run extraction over an already parsed tree.
    pub fn extract<N: SyntaxNode>(
        &self,
        path: &Path,
        language: Language,
        root: &N,
        source: &[u8],
        module_name: Option<&str>,
    ) -> Result<ParsedFile> {
        let functions = self.extractor.function_definitions(root);
        let imported_modules = self.extractor.imports(root, source);
        let local_call_graph = self
            .builder
            .build(&functions, source, module_name, &imported_modules)
            .map_err(|err| err.with_path(path))?;

        let function_definitions = functions
            .iter()
            .map(|function| {
                let name = self.extractor.function_name(function, source)?;
                let byte_range = function.byte_range();
                Ok(FunctionDefinition {
                    name: name.to_string(),
                    qualified_name: qualify(module_name, name),
                    line_number: line_at(source, byte_range.start),
                    byte_range,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|err| err.with_path(path))?;

        let call_sites = self
            .extractor
            .call_sites(root)
            .iter()
            .map(|call| {
                let byte_range = call.byte_range();
                CallSite {
                    called_name: self.extractor.callee_text(call, source).to_string(),
                    line_number: line_at(source, byte_range.start),
                    byte_range,
                }
            })
            .collect();

        Ok(ParsedFile {
            path: path.to_path_buf(),
            module_name: module_name.map(str::to_string),
            language,
            imported_modules,
            function_definitions,
            call_sites,
            local_call_graph,
            module_call_map: self.extractor.module_call_map(root, source),
        })
    }
}

impl Default for FileParser {
    fn default() -> Self {
        Self::new(
            Arc::new(LanguageRegistry::default()),
            Arc::new(TreeSitterProvider::new()),
        )
    }
}

impl std::fmt::Debug for FileParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileParser")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
