use std::path::PathBuf;

use crate::parsers::language::Language;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while scanning a project or parsing a single file.
///
/// Only [`Error::Scan`] aborts a whole scan. Every other variant is attached to
/// the file that produced it and reported next to the assembled graphs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("no grammar available for language `{0}`")]
    GrammarUnavailable(Language),

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("malformed syntax tree in {}: {reason}", .path.display())]
    Extraction { path: PathBuf, reason: String },

    #[error("invalid scan input: {0}")]
    Scan(String),

    #[error("{} points outside the project root", .0.display())]
    OutsideRoot(PathBuf),

    #[error("{0} appears more than once in the source; the first entry was kept")]
    DuplicatePath(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn extraction(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Extraction {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Attach a file path to an error raised without one.
    pub(crate) fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            Error::Extraction { reason, .. } => Error::Extraction {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        }
    }
}
