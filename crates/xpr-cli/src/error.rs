//! Error types for xpr-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from xpr-fs
    #[error(transparent)]
    Fs(#[from] xpr_fs::Error),

    /// Error from the rewriting core
    #[error(transparent)]
    Rewrite(#[from] xpr_rewrite::Error),

    /// Error from the Vivado integration
    #[error(transparent)]
    Vivado(#[from] xpr_vivado::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
