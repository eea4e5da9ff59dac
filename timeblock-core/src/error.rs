//! Error types for timeblock operations.

use thiserror::Error;

/// Errors that can occur in timeblock operations.
#[derive(Error, Debug)]
pub enum TimeblockError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid clock time '{0}'. Expected HH:MM:SS followed by a zone offset (e.g. 09:00:00+00)")]
    InvalidClockTime(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TimeblockError {
    fn from(e: serde_json::Error) -> Self {
        TimeblockError::Serialization(e.to_string())
    }
}

/// Result type alias for timeblock operations.
pub type TimeblockResult<T> = Result<T, TimeblockError>;
