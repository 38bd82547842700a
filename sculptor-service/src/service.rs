//! The content service: a thin composition root.
//!
//! Wires the example store, the transformation log and the dataset sync
//! engine behind the operations the UI calls. All orchestration lives
//! here; each collaborator keeps its own invariants.

use crate::error::ServiceResult;
use crate::generation::GenerationService;
use sculptor_store::{ExampleStore, TransformationLog};
use sculptor_sync::{DatasetSyncEngine, SyncStatus};
use sculptor_types::{Example, Metadata, Platform, TransformationRecord};
use std::path::Path;
use tracing::{debug, info};

/// Service-level configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Sampling temperature handed to the generation service; the core
    /// passes it through without interpreting it.
    pub default_temperature: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_temperature: 0.8,
        }
    }
}

/// The composition root for the content engine.
pub struct ContentService {
    examples: ExampleStore,
    history: TransformationLog,
    engine: DatasetSyncEngine,
    config: ServiceConfig,
}

impl ContentService {
    /// Wires a service from already-constructed collaborators.
    pub fn new(
        examples: ExampleStore,
        history: TransformationLog,
        engine: DatasetSyncEngine,
        config: ServiceConfig,
    ) -> Self {
        Self {
            examples,
            history,
            engine,
            config,
        }
    }

    /// Opens both stores on one database file and wires the service.
    pub fn open(
        db_path: impl AsRef<Path>,
        engine: DatasetSyncEngine,
        config: ServiceConfig,
    ) -> ServiceResult<Self> {
        let examples = ExampleStore::new(db_path.as_ref())?;
        let history = TransformationLog::new(db_path.as_ref())?;
        Ok(Self::new(examples, history, engine, config))
    }

    // ── Examples ─────────────────────────────────────────────────

    /// Adds a style example for a platform.
    pub fn add_example(&self, platform: Platform, content: &str) -> ServiceResult<Example> {
        Ok(self.examples.add_example(platform, content)?)
    }

    /// Lists all examples for a platform, oldest first.
    pub fn list_examples(&self, platform: Platform) -> ServiceResult<Vec<Example>> {
        Ok(self.examples.list_examples(platform)?)
    }

    /// Lists the `n` most recent examples, newest first.
    pub fn recent_examples(&self, platform: Platform, n: usize) -> ServiceResult<Vec<Example>> {
        Ok(self.examples.recent_examples(platform, n)?)
    }

    /// Returns the number of examples stored for a platform.
    pub fn count_examples(&self, platform: Platform) -> ServiceResult<u64> {
        Ok(self.examples.count_examples(platform)?)
    }

    /// Imports blank-line-separated examples from free text.
    pub fn import_examples(&self, platform: Platform, text: &str) -> ServiceResult<usize> {
        Ok(self.examples.import_blocks(platform, text)?)
    }

    // ── Transformations ──────────────────────────────────────────

    /// Persists one transformation and mirrors it into the dataset.
    ///
    /// The durable log append happens first and is the only part that can
    /// fail the caller; mirroring (and any auto-sync push it schedules)
    /// is failure-isolated inside the engine.
    pub async fn save_transformation(
        &self,
        platform: Platform,
        original_text: &str,
        transformed_text: &str,
        metadata: Metadata,
    ) -> ServiceResult<TransformationRecord> {
        let record = self
            .history
            .append(platform, original_text, transformed_text, metadata)?;
        self.engine
            .record_transformation(platform, original_text, transformed_text, &record.metadata)
            .await;
        debug!(%platform, id = %record.id, "transformation saved");
        Ok(record)
    }

    /// Returns transformation history, newest first.
    pub fn list_history(
        &self,
        platform: Platform,
        limit: usize,
        offset: usize,
    ) -> ServiceResult<Vec<TransformationRecord>> {
        Ok(self.history.query(platform, limit, offset)?)
    }

    /// Runs the primary flow: generate a rewrite conditioned on the
    /// platform's examples, then save it.
    ///
    /// A generation failure propagates and persists nothing.
    pub async fn transform(
        &self,
        generator: &dyn GenerationService,
        platform: Platform,
        text: &str,
    ) -> ServiceResult<String> {
        let examples: Vec<String> = self
            .examples
            .list_examples(platform)?
            .into_iter()
            .map(|e| e.content)
            .collect();
        let temperature = self.config.default_temperature;

        let transformed = generator
            .generate(text, platform, &examples, temperature)
            .await?;

        let mut metadata = Metadata::new();
        metadata.insert("temperature".into(), serde_json::json!(temperature));
        metadata.insert("example_count".into(), serde_json::json!(examples.len()));
        self.save_transformation(platform, text, &transformed, metadata)
            .await?;

        info!(%platform, "transformation complete");
        Ok(transformed)
    }

    // ── Sync ─────────────────────────────────────────────────────

    /// Pushes the dataset to the remote hub now, surfacing any error.
    pub async fn sync_now(&self) -> ServiceResult<()> {
        Ok(self.engine.push().await?)
    }

    /// Returns the current sync status.
    pub async fn sync_status(&self) -> SyncStatus {
        self.engine.status().await
    }

    /// Returns the sync engine, e.g. for export or snapshot access.
    pub fn engine(&self) -> &DatasetSyncEngine {
        &self.engine
    }
}
