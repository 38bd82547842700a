//! Error types for the store layer.

use sculptor_types::ValidationError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// A database failure fails the specific call; it never corrupts the
/// in-memory view for subsequent calls.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied input was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The underlying SQLite operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be decoded.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// Metadata could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}
