use thiserror::Error;

/// Unified error type for docker-publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Command `{command}` failed with exit code {code}\n{stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set output: {0}")]
    Output(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in docker-publish
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }

    /// Create a missing-input error for the named input
    pub fn missing_input(name: impl Into<String>) -> Self {
        PublishError::MissingInput(name.into())
    }

    /// Create an output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        PublishError::Output(msg.into())
    }

    /// True for errors raised before any external command could run
    pub fn is_configuration(&self) -> bool {
        matches!(self, PublishError::Config(_) | PublishError::MissingInput(_))
    }
}
