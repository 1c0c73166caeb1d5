use std::collections::HashSet;

use crate::parsers::python::ImportedModule;

/// Outcome of resolving one callee name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Defined in the calling module.
    Local(String),
    /// Named by one of the calling module's imports.
    Imported(String),
    /// Left as the raw callee text.
    Unresolved(String),
}

impl Resolution {
    pub fn qualified_name(&self) -> &str {
        match self {
            Resolution::Local(name) | Resolution::Imported(name) | Resolution::Unresolved(name) => {
                name
            }
        }
    }

    pub fn into_qualified_name(self) -> String {
        match self {
            Resolution::Local(name) | Resolution::Imported(name) | Resolution::Unresolved(name) => {
                name
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved(_))
    }
}

/// Syntactic callee resolver for a single module.
///
/// Lookup order is local definitions, then imports, then nothing. There is
/// no alias chasing and no cross-file symbol table, so two modules calling
/// the same unresolved name share one unqualified node.
#[derive(Debug, Clone)]
pub struct NameResolver<'a> {
    module_name: Option<&'a str>,
    local_functions: HashSet<&'a str>,
    imports: &'a [ImportedModule],
}

impl<'a> NameResolver<'a> {
    pub fn new<I>(
        module_name: Option<&'a str>,
        local_functions: I,
        imports: &'a [ImportedModule],
    ) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            module_name,
            local_functions: local_functions.into_iter().collect(),
            imports,
        }
    }

    /// Qualified name of a function defined in this module.
    pub fn qualify(&self, name: &str) -> String {
        qualify(self.module_name, name)
    }

    pub fn resolve(&self, callee: &str) -> Resolution {
        let Some(module_name) = self.module_name else {
            return Resolution::Unresolved(callee.to_string());
        };

        if self.local_functions.contains(callee) {
            return Resolution::Local(format!("{module_name}.{callee}"));
        }

        if let Some(import) = self.matching_import(callee) {
            return Resolution::Imported(format!("{}.{}", import.base_name(), callee));
        }

        Resolution::Unresolved(callee.to_string())
    }

    fn matching_import(&self, callee: &str) -> Option<&'a ImportedModule> {
        self.imports
            .iter()
            .find(|import| import.names_component(callee) || import.imports_object(callee))
    }
}

/// `<module>.<name>` when a module is given, else the bare name.
pub fn qualify(module_name: Option<&str>, name: &str) -> String {
    match module_name {
        Some(module) => format!("{module}.{name}"),
        None => name.to_string(),
    }
}
