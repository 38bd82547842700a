//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A configuration value required for push is absent.
    #[error("missing configuration value: {0}")]
    Configuration(&'static str),

    /// Network error talking to the remote hub.
    #[error("network error: {0}")]
    Network(String),

    /// The remote hub rejected the request.
    #[error("remote hub error (status {status}): {message}")]
    Remote { status: u16, message: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The push did not complete within the configured timeout.
    #[error("push timed out")]
    Timeout,
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(err.to_string())
    }
}
