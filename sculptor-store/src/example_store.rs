//! Per-platform corpus of style examples.
//!
//! One table per platform (fixed dispatch over the closed [`Platform`]
//! enum), each with a secondary index on `created_at` for descending
//! queries. No network access; the only side effect is the durable insert.

use crate::error::{StoreError, StoreResult};
use rusqlite::{Connection, params};
use sculptor_types::{Example, ExampleId, Platform, Timestamp};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Returns the examples table for a platform.
const fn table_for(platform: Platform) -> &'static str {
    match platform {
        Platform::LinkedIn => "linkedin_examples",
        Platform::Twitter => "twitter_examples",
        Platform::Instagram => "instagram_examples",
    }
}

/// Durable store of style examples, partitioned by platform.
pub struct ExampleStore {
    conn: Arc<Mutex<Connection>>,
}

impl ExampleStore {
    /// Opens (or creates) an example store at the given path.
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Database(format!("failed to open example store: {e}")))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory example store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::Database(format!("failed to open in-memory example store: {e}"))
        })?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        for platform in Platform::ALL {
            let table = table_for(platform);
            conn.execute_batch(&format!(
                "
                CREATE TABLE IF NOT EXISTS {table} (
                    id TEXT PRIMARY KEY,
                    content TEXT NOT NULL,
                    created_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_{table}_created_at
                    ON {table} (created_at);
                ",
            ))
            .map_err(|e| StoreError::Database(format!("failed to init example schema: {e}")))?;
        }
        Ok(())
    }

    /// Adds an example for a platform.
    ///
    /// Trims the content; empty or whitespace-only content fails with a
    /// [`sculptor_types::ValidationError`] and nothing is persisted.
    pub fn add_example(&self, platform: Platform, content: &str) -> StoreResult<Example> {
        let example = Example::new(platform, content)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!(
                "INSERT INTO {} (id, content, created_at) VALUES (?1, ?2, ?3)",
                table_for(platform)
            ),
            params![
                example.id.to_string(),
                example.content,
                example.created_at.as_millis() as i64,
            ],
        )?;
        debug!(%platform, id = %example.id, "stored example");
        Ok(example)
    }

    /// Lists all examples for a platform in insertion order (oldest first).
    pub fn list_examples(&self, platform: Platform) -> StoreResult<Vec<Example>> {
        self.select(
            platform,
            &format!(
                "SELECT id, content, created_at FROM {} ORDER BY created_at ASC, id ASC",
                table_for(platform)
            ),
            None,
        )
    }

    /// Lists the `n` most recent examples, newest first.
    pub fn recent_examples(&self, platform: Platform, n: usize) -> StoreResult<Vec<Example>> {
        self.select(
            platform,
            &format!(
                "SELECT id, content, created_at FROM {} ORDER BY created_at DESC, id DESC LIMIT ?1",
                table_for(platform)
            ),
            Some(n),
        )
    }

    /// Returns the number of examples stored for a platform.
    pub fn count_examples(&self, platform: Platform) -> StoreResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table_for(platform)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Imports examples from free text, one example per blank-line-separated
    /// block. Whitespace-only blocks are skipped. Returns how many examples
    /// were added.
    pub fn import_blocks(&self, platform: Platform, text: &str) -> StoreResult<usize> {
        let mut added = 0;
        for block in text.split("\n\n") {
            if block.trim().is_empty() {
                continue;
            }
            self.add_example(platform, block)?;
            added += 1;
        }
        debug!(%platform, added, "imported example blocks");
        Ok(added)
    }

    fn select(
        &self,
        platform: Platform,
        sql: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Example>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql)?;

        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(String, String, i64)> {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        };
        let rows: Vec<(String, String, i64)> = match limit {
            Some(n) => stmt
                .query_map(params![n as i64], map_row)?
                .collect::<rusqlite::Result<_>>()?,
            None => stmt
                .query_map([], map_row)?
                .collect::<rusqlite::Result<_>>()?,
        };

        rows.into_iter()
            .map(|(id, content, created_at)| {
                let id = ExampleId::parse(&id)
                    .map_err(|e| StoreError::Corrupt(format!("invalid example id: {e}")))?;
                Ok(Example {
                    id,
                    platform,
                    content,
                    created_at: Timestamp::from_millis(created_at as u64),
                })
            })
            .collect()
    }
}
