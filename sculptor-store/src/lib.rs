//! SQLite storage layer for the Sculptor content engine.
//!
//! Provides the two durable, per-platform collections the service layer is
//! built on:
//!
//! - [`ExampleStore`] — short style examples used to condition generation
//! - [`TransformationLog`] — append-only original/transformed history
//!
//! # Layout
//!
//! Six logical tables, one per {platform} × {examples, transformations},
//! selected by a `match` over the closed [`sculptor_types::Platform`] enum.
//! Each table is keyed by its record id with a secondary index on
//! `created_at` to support descending queries. Every write is a single-row
//! transaction; there are no cross-record transactions and no network calls.

mod error;
mod example_store;
mod transformation_log;

pub use error::{StoreError, StoreResult};
pub use example_store::ExampleStore;
pub use transformation_log::TransformationLog;
