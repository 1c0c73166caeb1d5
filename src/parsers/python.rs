use serde::{Deserialize, Serialize};
use std::fmt;

use super::common::SyntaxNode;

pub const IMPORT_STATEMENT: &str = "import_statement";
pub const IMPORT_FROM_STATEMENT: &str = "import_from_statement";

/// One module named by an import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedModule {
    base_name: String,
    alias: Option<String>,
    imported_objects: Option<Vec<String>>,
}

impl ImportedModule {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            alias: None,
            imported_objects: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imported_objects = Some(objects.into_iter().map(Into::into).collect());
        self
    }

    /// Build the modules named by an `import` or `from ... import` node.
    ///
    /// `from X import a, b` yields a single module `X` with objects `[a, b]`.
    /// `import a.b, c as d` yields one module per imported name. Other node
    /// kinds yield nothing.
    pub fn from_declaration<N: SyntaxNode>(node: &N, source: &[u8]) -> Vec<Self> {
        match node.kind() {
            IMPORT_FROM_STATEMENT => {
                let named = node.named_children();
                let Some((module, objects)) = named.split_first() else {
                    return Vec::new();
                };
                let objects = objects.iter().map(|object| object.text(source));
                vec![ImportedModule::new(module.text(source)).with_objects(objects)]
            }
            IMPORT_STATEMENT => node
                .children()
                .iter()
                .filter_map(|child| match child.kind() {
                    "dotted_name" => Some(ImportedModule::new(child.text(source))),
                    "aliased_import" => {
                        let parts = child.named_children();
                        let base = parts.first()?;
                        let module = ImportedModule::new(base.text(source));
                        Some(match parts.get(1) {
                            Some(alias) => module.with_alias(alias.text(source)),
                            None => module,
                        })
                    }
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn imported_objects(&self) -> Option<&[String]> {
        self.imported_objects.as_deref()
    }

    /// Dotted components of the base name: `a.b.c` -> `a`, `b`, `c`.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.base_name.split('.')
    }

    pub fn names_component(&self, name: &str) -> bool {
        self.components().any(|component| component == name)
    }

    pub fn imports_object(&self, name: &str) -> bool {
        self.imported_objects
            .as_ref()
            .is_some_and(|objects| objects.iter().any(|object| object == name))
    }
}

impl fmt::Display for ImportedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} as {}", self.base_name, alias),
            None => f.write_str(&self.base_name),
        }
    }
}
