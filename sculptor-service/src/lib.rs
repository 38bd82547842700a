//! Composition root for the Sculptor content engine.
//!
//! Wires the per-platform [`sculptor_store`] collections and the
//! [`sculptor_sync`] engine behind one [`ContentService`], and defines the
//! opaque [`GenerationService`] boundary the UI calls through.
//!
//! The control flow is: generate (external) → `save_transformation` →
//! durable log append → dataset mirror → optional background push. Only
//! the durable append can fail the caller; everything downstream is
//! failure-isolated.

mod error;
mod generation;
mod service;

pub use error::{ServiceError, ServiceResult};
pub use generation::{GenerationError, GenerationService};
pub use service::{ContentService, ServiceConfig};
