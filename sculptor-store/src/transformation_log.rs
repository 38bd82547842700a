//! Append-only history of original/transformed pairs.
//!
//! One table per platform, single-row inserts (all-or-nothing per append),
//! queried newest-first. Original and transformed texts may be empty; the
//! generation boundary owns content validation, not the log.

use crate::error::{StoreError, StoreResult};
use rusqlite::{Connection, params};
use sculptor_types::{Metadata, Platform, RecordId, Timestamp, TransformationRecord};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Returns the transformations table for a platform.
const fn table_for(platform: Platform) -> &'static str {
    match platform {
        Platform::LinkedIn => "linkedin_transformations",
        Platform::Twitter => "twitter_transformations",
        Platform::Instagram => "instagram_transformations",
    }
}

/// Durable append-only log of transformations, partitioned by platform.
pub struct TransformationLog {
    conn: Arc<Mutex<Connection>>,
}

impl TransformationLog {
    /// Opens (or creates) a transformation log at the given path.
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Database(format!("failed to open transformation log: {e}")))?;
        let log = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        log.init_schema()?;
        Ok(log)
    }

    /// Opens an in-memory transformation log (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::Database(format!("failed to open in-memory transformation log: {e}"))
        })?;
        let log = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        log.init_schema()?;
        Ok(log)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        for platform in Platform::ALL {
            let table = table_for(platform);
            conn.execute_batch(&format!(
                "
                CREATE TABLE IF NOT EXISTS {table} (
                    id TEXT PRIMARY KEY,
                    original_text TEXT NOT NULL,
                    transformed_text TEXT NOT NULL,
                    metadata TEXT NOT NULL,
                    created_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_{table}_created_at
                    ON {table} (created_at);
                ",
            ))
            .map_err(|e| StoreError::Database(format!("failed to init log schema: {e}")))?;
        }
        Ok(())
    }

    /// Appends one transformation record durably and returns it.
    pub fn append(
        &self,
        platform: Platform,
        original_text: &str,
        transformed_text: &str,
        metadata: Metadata,
    ) -> StoreResult<TransformationRecord> {
        let record =
            TransformationRecord::new(platform, original_text, transformed_text, metadata);
        let metadata_json = serde_json::to_string(&record.metadata)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!(
                "INSERT INTO {} (id, original_text, transformed_text, metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                table_for(platform)
            ),
            params![
                record.id.to_string(),
                record.original_text,
                record.transformed_text,
                metadata_json,
                record.created_at.as_millis() as i64,
            ],
        )?;
        debug!(%platform, id = %record.id, "appended transformation");
        Ok(record)
    }

    /// Queries records newest-first, with `limit`/`offset` pagination.
    ///
    /// Returns an empty vec (not an error) when the platform has no records.
    pub fn query(
        &self,
        platform: Platform,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<TransformationRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, original_text, transformed_text, metadata, created_at
             FROM {} ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
            table_for(platform)
        ))?;

        let rows: Vec<(String, String, String, String, i64)> = stmt
            .query_map(params![limit as i64, offset as i64], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect::<rusqlite::Result<_>>()?;

        rows.into_iter()
            .map(|(id, original_text, transformed_text, metadata_json, created_at)| {
                let id = RecordId::parse(&id)
                    .map_err(|e| StoreError::Corrupt(format!("invalid record id: {e}")))?;
                let metadata: Metadata = serde_json::from_str(&metadata_json)
                    .map_err(|e| StoreError::Corrupt(format!("invalid metadata: {e}")))?;
                Ok(TransformationRecord {
                    id,
                    platform,
                    original_text,
                    transformed_text,
                    created_at: Timestamp::from_millis(created_at as u64),
                    metadata,
                })
            })
            .collect()
    }

    /// Returns the number of records logged for a platform.
    pub fn count(&self, platform: Platform) -> StoreResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table_for(platform)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
