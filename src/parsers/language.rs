use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Languages the registry knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Go,
    Java,
    JavaScript,
    Php,
    Python,
    Ruby,
    Rust,
    Scala,
    Swift,
    TypeScript,
    Bash,
    Clojure,
    Elixir,
    Erlang,
    Haskell,
    Lua,
    Perl,
}

impl Language {
    pub const ALL: [Language; 20] = [
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Java,
        Language::JavaScript,
        Language::Php,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Scala,
        Language::Swift,
        Language::TypeScript,
        Language::Bash,
        Language::Clojure,
        Language::Elixir,
        Language::Erlang,
        Language::Haskell,
        Language::Lua,
        Language::Perl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Php => "php",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Scala => "scala",
            Language::Swift => "swift",
            Language::TypeScript => "typescript",
            Language::Bash => "bash",
            Language::Clojure => "clojure",
            Language::Elixir => "elixir",
            Language::Erlang => "erlang",
            Language::Haskell => "haskell",
            Language::Lua => "lua",
            Language::Perl => "perl",
        }
    }

    /// The file extension the registry maps to this language.
    pub fn extension(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "cs",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "js",
            Language::Php => "php",
            Language::Python => "py",
            Language::Ruby => "rb",
            Language::Rust => "rs",
            Language::Scala => "scala",
            Language::Swift => "swift",
            Language::TypeScript => "ts",
            Language::Bash => "sh",
            Language::Clojure => "clj",
            Language::Elixir => "ex",
            Language::Erlang => "erl",
            Language::Haskell => "hs",
            Language::Lua => "lua",
            Language::Perl => "pl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "c++" => Some(Language::Cpp),
            "c#" => Some(Language::CSharp),
            other => Language::ALL.into_iter().find(|lang| lang.as_str() == other),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_name(s).ok_or_else(|| format!("unknown language: {s}"))
    }
}

/// Immutable extension to language table.
///
/// Built once and handed to the scanner and file parser; nothing consults a
/// global table.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    extensions: HashMap<&'static str, Language>,
}

impl LanguageRegistry {
    /// A registry containing only the given languages.
    pub fn restricted_to(languages: &[Language]) -> Self {
        let extensions = languages
            .iter()
            .map(|&language| (language.extension(), language))
            .collect();
        Self { extensions }
    }

    pub fn language_for_extension(&self, extension: &str) -> Option<Language> {
        self.extensions.get(extension).copied()
    }

    pub fn language_for_path(&self, path: &Path) -> Option<Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.language_for_extension(ext))
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.extensions.values().copied()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::restricted_to(&Language::ALL)
    }
}
