//! Dataset analysis and fine-tuning export.
//!
//! Pure functions over a [`DatasetSnapshot`]; callers decide where the
//! output goes. Placeholder rows are never counted or exported.

use crate::dataset::DatasetSnapshot;
use crate::error::SyncResult;
use sculptor_types::Platform;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics for one partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionStats {
    /// Real rows in the partition.
    pub total_rows: usize,
    /// Average character length of the original texts.
    pub avg_original_length: f64,
    /// Average character length of the transformed texts.
    pub avg_transformed_length: f64,
}

/// Per-platform statistics over a snapshot.
pub type DatasetStats = BTreeMap<Platform, PartitionStats>;

/// Computes per-platform statistics, excluding placeholder rows.
#[must_use]
pub fn dataset_stats(snapshot: &DatasetSnapshot) -> DatasetStats {
    let mut stats = DatasetStats::new();
    for (platform, columns) in &snapshot.partitions {
        if columns.is_placeholder_only() {
            stats.insert(
                *platform,
                PartitionStats {
                    total_rows: 0,
                    avg_original_length: 0.0,
                    avg_transformed_length: 0.0,
                },
            );
            continue;
        }
        let rows = columns.len();
        let avg = |texts: &[String]| {
            if rows == 0 {
                0.0
            } else {
                texts.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / rows as f64
            }
        };
        stats.insert(
            *platform,
            PartitionStats {
                total_rows: rows,
                avg_original_length: avg(&columns.original_text),
                avg_transformed_length: avg(&columns.transformed_text),
            },
        );
    }
    stats
}

/// Serializes the snapshot as chat-format fine-tuning data, one JSON object
/// per line. Placeholder rows are skipped.
pub fn fine_tuning_jsonl(snapshot: &DatasetSnapshot) -> SyncResult<String> {
    let mut out = String::new();
    for (platform, columns) in &snapshot.partitions {
        if columns.is_placeholder_only() {
            continue;
        }
        for i in 0..columns.len() {
            let example = serde_json::json!({
                "messages": [
                    {
                        "role": "system",
                        "content": format!("You are a content optimizer for {platform}"),
                    },
                    { "role": "user", "content": columns.original_text[i] },
                    { "role": "assistant", "content": columns.transformed_text[i] },
                ]
            });
            out.push_str(&serde_json::to_string(&example)?);
            out.push('\n');
        }
    }
    Ok(out)
}
