//! Error types for the service layer.

use crate::generation::GenerationError;
use sculptor_store::StoreError;
use sculptor_sync::SyncError;
use sculptor_types::ValidationError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller-supplied input was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A durable store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A direct sync operation failed. Background sync failures never take
    /// this path; they are visible only via the sync status.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// The text-generation service failed. Nothing is persisted in that
    /// case.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
