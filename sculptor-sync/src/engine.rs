//! Dataset sync engine.
//!
//! Orchestrates the in-memory [`PartitionedDataset`] against a remote
//! [`DatasetHub`]: loads the mirror on startup, appends on every saved
//! transformation, and pushes full snapshots on demand or in the
//! background.
//!
//! Failure isolation is the point of this layer: `record_transformation`
//! runs inline with the primary save path and never fails the caller, and
//! a failed push is visible only through [`SyncStatus`] and logs.

use crate::dataset::{DatasetSnapshot, PartitionedDataset};
use crate::error::{SyncError, SyncResult};
use crate::hub::DatasetHub;
use crate::state::SyncStatus;
use sculptor_types::{Metadata, Platform};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Configuration for the sync engine.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Access credential for the remote hub. Required for push.
    pub credential: Option<String>,
    /// Remote repository identifier. Required for push.
    pub repository: Option<String>,
    /// When true, every recorded transformation schedules a background push.
    pub auto_sync: bool,
    /// Deadline for one push; on expiry the push fails and the local mirror
    /// is left untouched.
    pub push_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            credential: None,
            repository: None,
            auto_sync: false,
            push_timeout: Duration::from_secs(30),
        }
    }
}

/// The dataset sync engine.
///
/// Cheaply cloneable; clones share the same mirror, status and push gate.
#[derive(Clone)]
pub struct DatasetSyncEngine {
    config: SyncConfig,
    hub: Arc<dyn DatasetHub>,
    dataset: Arc<RwLock<PartitionedDataset>>,
    status: Arc<RwLock<SyncStatus>>,
    /// Serializes pushes: at most one in flight.
    push_gate: Arc<Mutex<()>>,
    /// Coalesces background push requests arriving while one is in flight.
    push_pending: Arc<AtomicBool>,
}

impl DatasetSyncEngine {
    /// Creates an engine with an empty mirror.
    pub fn new(hub: Arc<dyn DatasetHub>, config: SyncConfig) -> Self {
        Self {
            config,
            hub,
            dataset: Arc::new(RwLock::new(PartitionedDataset::new())),
            status: Arc::new(RwLock::new(SyncStatus::Idle)),
            push_gate: Arc::new(Mutex::new(())),
            push_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates an engine, seeding the mirror from the remote hub when a
    /// repository is configured and reachable.
    ///
    /// Never fails the caller: a missing repository or any load failure
    /// downgrades to an empty mirror.
    pub async fn initialize(hub: Arc<dyn DatasetHub>, config: SyncConfig) -> Self {
        let engine = Self::new(hub, config);
        let Some(repository) = engine.config.repository.clone() else {
            debug!("no repository configured, starting with empty dataset");
            return engine;
        };

        match engine.hub.fetch(&repository).await {
            Ok(Some(snapshot)) => {
                info!(%repository, "loaded existing dataset from hub");
                *engine.dataset.write().await = PartitionedDataset::from_snapshot(snapshot);
            }
            Ok(None) => {
                info!(%repository, "remote dataset not found, starting empty");
            }
            Err(e) => {
                warn!(%repository, error = %e, "failed to load remote dataset, starting empty");
            }
        }
        engine
    }

    /// Mirrors one saved transformation into the dataset.
    ///
    /// Runs inline with the primary save path, so it never fails the
    /// caller: any error from the partition layer is logged and swallowed.
    /// With `auto_sync` enabled, schedules a background push afterwards.
    pub async fn record_transformation(
        &self,
        platform: Platform,
        original_text: &str,
        transformed_text: &str,
        metadata: &Metadata,
    ) {
        {
            let mut dataset = self.dataset.write().await;
            if let Err(e) =
                dataset.append_record(platform, original_text, transformed_text, metadata)
            {
                warn!(%platform, error = %e, "failed to mirror transformation into dataset");
                return;
            }
        }
        if self.config.auto_sync {
            self.push_in_background();
        }
    }

    /// Pushes the current snapshot to the hub as a full replacement.
    ///
    /// Fails fast with [`SyncError::Configuration`] — without entering
    /// `Syncing` — when the credential or repository is absent. Otherwise
    /// waits for any in-flight push, then runs Idle → Syncing → Idle
    /// (success) or Failed (error/timeout). All-or-nothing: a failed push
    /// changes nothing locally and `Failed` is cleanly retryable.
    pub async fn push(&self) -> SyncResult<()> {
        self.require_push_config()?;
        let result = {
            let _gate = self.push_gate.lock().await;
            self.push_locked().await
        };
        // A background request that arrived while this push held the gate
        // bailed out expecting the gate holder to drain the pending flag.
        if self.push_pending.load(Ordering::SeqCst) {
            let engine = self.clone();
            tokio::spawn(async move {
                engine.drive_background_pushes().await;
            });
        }
        result
    }

    /// Schedules a push without blocking the caller.
    ///
    /// Requests are queued-and-coalesced: at most one push in flight, plus
    /// one pending run that observes the latest snapshot. Failures are
    /// observable only via [`SyncStatus`] and logs.
    pub fn push_in_background(&self) {
        self.push_pending.store(true, Ordering::SeqCst);
        let engine = self.clone();
        tokio::spawn(async move {
            engine.drive_background_pushes().await;
        });
    }

    /// Returns the current sync status.
    pub async fn status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    /// Returns a consistent snapshot of the mirror.
    pub async fn snapshot(&self) -> DatasetSnapshot {
        self.dataset.read().await.snapshot()
    }

    /// Row count for a platform excluding any placeholder.
    pub async fn real_row_count(&self, platform: Platform) -> usize {
        self.dataset.read().await.real_row_count(platform)
    }

    /// Total row count for a platform, placeholder included.
    pub async fn row_count(&self, platform: Platform) -> usize {
        self.dataset.read().await.row_count(platform)
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    fn require_push_config(&self) -> SyncResult<&str> {
        if self.config.credential.is_none() {
            return Err(SyncError::Configuration("credential"));
        }
        self.config
            .repository
            .as_deref()
            .ok_or(SyncError::Configuration("repository"))
    }

    /// Runs one push. Caller must hold `push_gate`.
    async fn push_locked(&self) -> SyncResult<()> {
        let repository = self.require_push_config()?.to_string();
        *self.status.write().await = SyncStatus::Syncing;

        let snapshot = self.dataset.read().await.snapshot();
        let outcome = tokio::time::timeout(
            self.config.push_timeout,
            self.hub.replace(&repository, &snapshot),
        )
        .await;

        match outcome {
            Ok(Ok(())) => {
                *self.status.write().await = SyncStatus::Idle;
                info!(%repository, "push succeeded");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(%repository, error = %e, "push failed");
                *self.status.write().await = SyncStatus::Failed {
                    last_error: e.to_string(),
                };
                Err(e)
            }
            Err(_) => {
                let e = SyncError::Timeout;
                warn!(%repository, error = %e, "push timed out");
                *self.status.write().await = SyncStatus::Failed {
                    last_error: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Drains pending background push requests, one push at a time.
    async fn drive_background_pushes(&self) {
        loop {
            {
                // The gate holder — another driver or a direct push —
                // drains the pending flag when it finishes.
                let Ok(_gate) = self.push_gate.try_lock() else {
                    return;
                };
                while self.push_pending.swap(false, Ordering::SeqCst) {
                    if let Err(e) = self.require_push_config() {
                        warn!(error = %e, "background push skipped: incomplete configuration");
                        *self.status.write().await = SyncStatus::Failed {
                            last_error: e.to_string(),
                        };
                        continue;
                    }
                    // Errors are already logged and reflected in the status.
                    let _ = self.push_locked().await;
                }
            }
            // A request that raced with the gate release must not strand the
            // pending flag.
            if !self.push_pending.load(Ordering::SeqCst) {
                return;
            }
        }
    }
}
