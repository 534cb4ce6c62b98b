//! Error types for lahan

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LahanError {
    // Local, pre-network errors the operator can correct
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    // Store errors
    #[error("{operation} failed: {reason}")]
    OperationFailed { operation: String, reason: String },

    #[error("Failed to load catalog: {reason}")]
    LoadFailed { reason: String },

    #[error("Store unreachable: {reason}")]
    Transport { reason: String },

    #[error("Store returned {status}: {body}")]
    Store { status: u16, body: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LahanError {
    /// Shorthand for a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        LahanError::Validation { reason: reason.into() }
    }

    /// Whether the error is local and user-correctable (never reached the store)
    pub fn is_validation(&self) -> bool {
        matches!(self, LahanError::Validation { .. })
    }
}

impl From<serde_json::Error> for LahanError {
    fn from(err: serde_json::Error) -> Self {
        LahanError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LahanError>;
