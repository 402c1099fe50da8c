use thiserror::Error;

/// Top-level error type for the Ava system.
///
/// Errors only occur at the edges (configuration files, snapshot
/// persistence). The dialogue surface itself is infallible: a failed slot
/// parse re-prompts, it never produces an error value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AvaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AvaError {
    fn from(err: toml::de::Error) -> Self {
        AvaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AvaError {
    fn from(err: toml::ser::Error) -> Self {
        AvaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AvaError {
    fn from(err: serde_json::Error) -> Self {
        AvaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Ava operations.
pub type Result<T> = std::result::Result<T, AvaError>;
