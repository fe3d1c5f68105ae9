//! Error types for the core library.

use thiserror::Error;

use crate::model::EmailId;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested email is not part of the snapshot.
    #[error("Email not found: {0}")]
    NotFound(EmailId),

    /// The mail source failed to produce messages.
    #[error("Mail source error: {0}")]
    Source(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
