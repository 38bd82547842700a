//! Dataset mirroring and remote hub sync for the Sculptor content engine.
//!
//! Mirrors per-platform transformation history into a schema-consistent,
//! multi-partition dataset and reconciles it with a remote hub for
//! downstream fine-tuning.
//!
//! # Architecture
//!
//! - **Dataset**: the in-memory partition map, one partition per platform,
//!   with schema parity maintained across partitions
//! - **Hub**: abstract remote dataset storage plus an HTTP implementation
//! - **State**: the Idle / Syncing / Failed machine
//! - **Engine**: orchestrates dataset and hub — seeds the mirror on
//!   startup, appends on every saved transformation, pushes full snapshots
//! - **Export**: statistics and fine-tuning JSONL over a snapshot
//!
//! # Failure isolation
//!
//! A sync failure must never break the primary user flow. Recording a
//! transformation swallows dataset errors, background pushes surface
//! failures only through [`SyncStatus`], and a direct push reports its
//! error without leaving the engine in a stuck state.
//!
//! # Example
//!
//! ```no_run
//! use sculptor_sync::{DatasetSyncEngine, HttpHub, HttpHubConfig, SyncConfig};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let hub = Arc::new(
//!     HttpHub::new(HttpHubConfig {
//!         credential: Some("token".to_string()),
//!         ..Default::default()
//!     })
//!     .unwrap(),
//! );
//! let config = SyncConfig {
//!     credential: Some("token".to_string()),
//!     repository: Some("acme/social-style".to_string()),
//!     ..Default::default()
//! };
//!
//! let engine = DatasetSyncEngine::initialize(hub, config).await;
//! # }
//! ```

mod dataset;
mod engine;
mod error;
pub mod export;
mod hub;
mod state;

pub use dataset::{DatasetSnapshot, PartitionColumns, PartitionedDataset};
pub use engine::{DatasetSyncEngine, SyncConfig};
pub use error::{SyncError, SyncResult};
pub use export::{DatasetStats, PartitionStats, dataset_stats, fine_tuning_jsonl};
pub use hub::{DatasetHub, HttpHub, HttpHubConfig};
pub use state::SyncStatus;
