//! Sync status tracking.
//!
//! The engine owns a single process-wide status value. `Failed` is
//! transient, not sticky: the next push trigger moves back through
//! `Syncing` regardless of the previous outcome.

use serde::{Deserialize, Serialize};

/// The state of the dataset sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SyncStatus {
    /// No push in progress.
    #[default]
    Idle,
    /// A push to the remote hub is in flight.
    Syncing,
    /// The last push failed; cleared by the next push attempt.
    Failed {
        /// Description of the last failure.
        last_error: String,
    },
}

impl SyncStatus {
    /// Returns true when no push is in progress and the last one succeeded.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, SyncStatus::Idle)
    }

    /// Returns true while a push is in flight.
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing)
    }

    /// Returns the last error, if the previous push failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        match self {
            SyncStatus::Failed { last_error } => Some(last_error),
            _ => None,
        }
    }
}
