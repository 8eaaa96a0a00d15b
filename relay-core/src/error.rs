//! Error types for the relay core.

use thiserror::Error;

/// Failures raised at the transport boundary.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
