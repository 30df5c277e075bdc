//! Error types for xpr-rewrite

use std::path::PathBuf;

/// Result type for xpr-rewrite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rewriting a project export.
///
/// Every variant is fatal for the project being processed: the rewrite
/// aborts and no portable script or source tree is committed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("listed source file {path} is not under the project directory {project_dir}")]
    UnresolvableReference {
        path: PathBuf,
        project_dir: PathBuf,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read raw script: {0}")]
    Read(#[source] std::io::Error),

    #[error("raw script ended before the third banner delimiter")]
    MissingBanner,

    #[error("raw script has no local/imported source file listing section")]
    ListingNotFound,

    #[error("source file listing opened at line {line} was never closed")]
    ListingNotClosed { line: usize },

    #[error(transparent)]
    Fs(#[from] xpr_fs::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
