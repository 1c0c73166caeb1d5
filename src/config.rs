use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parsers::language::{Language, LanguageRegistry};

/// Scanner settings.
///
/// ```toml
/// max_depth = 5
/// languages = ["python", "rust"]
/// parallel = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Deepest path component count below the root that is still scanned.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Languages to analyze. `None` means every registered language.
    #[serde(default)]
    pub languages: Option<Vec<Language>>,
    /// Parse files on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_max_depth() -> usize {
    3
}

fn default_parallel() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            languages: None,
            parallel: default_parallel(),
        }
    }
}

impl ScanConfig {
    pub fn from_toml_str(document: &str) -> Result<Self> {
        Ok(toml::from_str(document)?)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = Some(languages);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn registry(&self) -> LanguageRegistry {
        match &self.languages {
            Some(languages) => LanguageRegistry::restricted_to(languages),
            None => LanguageRegistry::default(),
        }
    }
}
