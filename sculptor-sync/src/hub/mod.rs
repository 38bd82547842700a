//! Remote dataset hub access.
//!
//! The hub holds the shared, multi-partition training dataset. Pushes are
//! whole-dataset replacements, which is what gives the engine its
//! all-or-nothing semantics.

mod http;

pub use http::{HttpHub, HttpHubConfig};

use crate::dataset::DatasetSnapshot;
use crate::error::SyncResult;
use async_trait::async_trait;

/// Abstract remote dataset hub.
#[async_trait]
pub trait DatasetHub: Send + Sync {
    /// Returns the name of the hub provider.
    fn provider_name(&self) -> &'static str;

    /// Fetches the existing dataset for a repository.
    ///
    /// Returns `Ok(None)` when the repository does not exist yet; that is
    /// not an error.
    async fn fetch(&self, repository: &str) -> SyncResult<Option<DatasetSnapshot>>;

    /// Replaces the repository's dataset with the given snapshot.
    ///
    /// The remote state after a successful call equals the snapshot exactly.
    async fn replace(&self, repository: &str, snapshot: &DatasetSnapshot) -> SyncResult<()>;
}
