//! In-memory mirror of the remote training dataset.
//!
//! The dataset is keyed by [`Platform`] and holds, per partition, the
//! parallel columns `original_text`, `transformed_text` and `metadata`
//! (JSON-serialized). Two invariants are maintained:
//!
//! - **Schema parity**: every partition exposes the same columns at every
//!   synchronization point. A partition with zero real rows that must
//!   coexist with a non-empty one carries exactly one placeholder row of
//!   empty values, so remote schema inference never sees a null-typed
//!   column.
//! - **Append order**: rows within a partition appear in append order.
//!
//! `append_record` is a read-modify-write over the whole partition map and
//! is NOT safe to call concurrently without external serialization. The
//! sync engine owns that lock; this type does not synchronize internally.

use crate::error::SyncResult;
use sculptor_types::{Metadata, Platform, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// The metadata value carried by a placeholder row.
const PLACEHOLDER_METADATA: &str = "{}";

/// Parallel columns of one platform's partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionColumns {
    /// Texts as submitted by users.
    pub original_text: Vec<String>,
    /// Platform-tailored rewrites.
    pub transformed_text: Vec<String>,
    /// JSON-serialized metadata, one string per row.
    pub metadata: Vec<String>,
}

impl PartitionColumns {
    /// Number of rows, placeholder included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.original_text.len()
    }

    /// Returns true when the partition has no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original_text.is_empty()
    }

    /// Returns true when the only row is a schema-parity placeholder.
    #[must_use]
    pub fn is_placeholder_only(&self) -> bool {
        self.len() == 1
            && self.original_text.first().is_some_and(|s| s.is_empty())
            && self.transformed_text.first().is_some_and(|s| s.is_empty())
            && self
                .metadata
                .first()
                .is_some_and(|s| matches!(s.as_str(), "" | PLACEHOLDER_METADATA))
    }

    fn push(&mut self, original: String, transformed: String, metadata: String) {
        self.original_text.push(original);
        self.transformed_text.push(transformed);
        self.metadata.push(metadata);
    }

    fn placeholder() -> Self {
        let mut columns = Self::default();
        columns.push(String::new(), String::new(), PLACEHOLDER_METADATA.to_string());
        columns
    }
}

/// A consistent, read-only copy of all partitions, as pushed to the hub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetSnapshot {
    /// Partition columns keyed by platform.
    pub partitions: BTreeMap<Platform, PartitionColumns>,
}

impl DatasetSnapshot {
    /// Returns one platform's columns, if present.
    #[must_use]
    pub fn partition(&self, platform: Platform) -> Option<&PartitionColumns> {
        self.partitions.get(&platform)
    }

    /// Total row count of a partition, placeholder included.
    #[must_use]
    pub fn row_count(&self, platform: Platform) -> usize {
        self.partitions.get(&platform).map_or(0, PartitionColumns::len)
    }
}

/// One platform's partition plus its placeholder marker.
#[derive(Debug, Clone, Default)]
struct PartitionState {
    columns: PartitionColumns,
    /// True when `columns` holds exactly the one placeholder row.
    placeholder: bool,
}

impl PartitionState {
    fn real_rows(&self) -> usize {
        if self.placeholder { 0 } else { self.columns.len() }
    }
}

/// The in-memory, per-platform mirror of transformation history.
#[derive(Debug, Clone)]
pub struct PartitionedDataset {
    partitions: BTreeMap<Platform, PartitionState>,
}

impl Default for PartitionedDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl PartitionedDataset {
    /// Creates an empty dataset with one partition per platform.
    #[must_use]
    pub fn new() -> Self {
        let partitions = Platform::ALL
            .into_iter()
            .map(|platform| (platform, PartitionState::default()))
            .collect();
        Self { partitions }
    }

    /// Adopts a remote snapshot as the starting mirror.
    ///
    /// Platforms missing from the snapshot start empty. A partition whose
    /// only row is all-empty is recognized as placeholder-only, so a later
    /// real append replaces it instead of stacking on top of it.
    #[must_use]
    pub fn from_snapshot(snapshot: DatasetSnapshot) -> Self {
        let mut dataset = Self::new();
        for (platform, columns) in snapshot.partitions {
            let placeholder = columns.is_placeholder_only();
            dataset
                .partitions
                .insert(platform, PartitionState { columns, placeholder });
        }
        dataset.ensure_parity();
        dataset
    }

    /// Appends one row to the platform's partition and re-establishes
    /// schema parity across all other partitions.
    ///
    /// The stored metadata is stamped with `platform` and `timestamp` keys
    /// before serialization.
    pub fn append_record(
        &mut self,
        platform: Platform,
        original_text: &str,
        transformed_text: &str,
        metadata: &Metadata,
    ) -> SyncResult<()> {
        let mut stamped = metadata.clone();
        stamped.insert("platform".into(), platform.as_str().into());
        stamped.insert("timestamp".into(), Timestamp::now().as_millis().into());
        let metadata_json = serde_json::to_string(&stamped)?;

        let partition = self
            .partitions
            .entry(platform)
            .or_default();
        if partition.placeholder {
            partition.columns = PartitionColumns::default();
            partition.placeholder = false;
        }
        partition.columns.push(
            original_text.to_string(),
            transformed_text.to_string(),
            metadata_json,
        );
        self.ensure_parity();

        debug!(%platform, rows = self.real_row_count(platform), "appended dataset row");
        Ok(())
    }

    /// Inserts a placeholder row into every zero-real-row partition when any
    /// partition holds real rows. Idempotent: a partition that already has a
    /// row (real or placeholder) is left alone.
    fn ensure_parity(&mut self) {
        let any_real = self.partitions.values().any(|p| p.real_rows() > 0);
        if !any_real {
            return;
        }
        for partition in self.partitions.values_mut() {
            if partition.real_rows() == 0 && !partition.placeholder {
                partition.columns = PartitionColumns::placeholder();
                partition.placeholder = true;
            }
        }
    }

    /// Returns a consistent deep copy of all partitions.
    #[must_use]
    pub fn snapshot(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            partitions: self
                .partitions
                .iter()
                .map(|(platform, state)| (*platform, state.columns.clone()))
                .collect(),
        }
    }

    /// Total row count for a platform, placeholder included.
    #[must_use]
    pub fn row_count(&self, platform: Platform) -> usize {
        self.partitions.get(&platform).map_or(0, |p| p.columns.len())
    }

    /// Row count excluding any placeholder.
    #[must_use]
    pub fn real_row_count(&self, platform: Platform) -> usize {
        self.partitions.get(&platform).map_or(0, PartitionState::real_rows)
    }
}
