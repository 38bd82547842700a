//! Core type definitions for the Sculptor content engine.
//!
//! This crate defines the fundamental types shared by the store, sync and
//! service layers:
//! - The closed [`Platform`] enumeration that scopes every entity
//! - Example and TransformationRecord identifiers (UUID v7)
//! - Millisecond-precision [`Timestamp`]s
//! - The [`Example`] and [`TransformationRecord`] models
//!
//! Anything that talks to a database, the network or a text-generation
//! service belongs in the layers above, not here.

mod error;
mod ids;
mod platform;
mod record;
mod timestamp;

pub use error::ValidationError;
pub use ids::{ExampleId, RecordId};
pub use platform::Platform;
pub use record::{Example, Metadata, TransformationRecord};
pub use timestamp::Timestamp;
