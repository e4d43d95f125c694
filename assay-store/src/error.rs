//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persistence collaborator is unreachable. The core never retries
    /// this internally; retry policy belongs to the orchestration layer.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be interpreted (bad id, malformed payload).
    #[error("invalid stored data: {0}")]
    InvalidData(String),
}
