use thiserror::Error;

/// Top-level error type for the Gaffer system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for GafferError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GafferError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GafferError {
    fn from(err: toml::de::Error) -> Self {
        GafferError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GafferError {
    fn from(err: serde_json::Error) -> Self {
        GafferError::Serialization(err.to_string())
    }
}

/// Convenience result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GafferError>;
