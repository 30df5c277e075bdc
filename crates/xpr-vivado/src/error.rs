//! Error types for xpr-vivado

/// Result type for xpr-vivado operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving the Vivado tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to {tool} stdin: {source}")]
    Stdin {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with code {code:?}: {stderr}")]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error(
        "Vivado {expected} is not on PATH; source the environment initialization scripts first"
    )]
    VersionMismatch { expected: String },
}
