//! Error types for axcheck

/// Result type alias using axcheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for axcheck operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was outside the range an operation accepts
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Element tree snapshot could not be built
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new snapshot error
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
