//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading fundamentals.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV deserialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Two records share the same display name
    #[error("Duplicate entity in snapshot: {0}")]
    DuplicateEntity(String),

    /// Snapshot content is structurally unusable
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
