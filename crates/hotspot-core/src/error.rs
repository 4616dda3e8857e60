//! Error types for the hotspot core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Identification datagram errors.
///
/// None of these are fatal: the polling loop drops the datagram and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("Payload is empty")]
    Empty,

    #[error("Not a peer index: {0:?}")]
    NotANumber(String),

    #[error("Peer index {0} out of range (expected 0..{})", crate::registry::PEER_SLOTS)]
    OutOfRange(i64),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Config not found: {0}")]
    NotFound(String),

    #[error("Config already exists: {0}")]
    AlreadyExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
