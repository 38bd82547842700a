//! Validation errors for caller-supplied input.

use thiserror::Error;

/// Errors raised for invalid caller input. Always surfaced synchronously,
/// never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Example content was empty or whitespace-only after trimming.
    #[error("example content cannot be empty")]
    EmptyContent,

    /// The platform tag is not one of the recognized platforms.
    #[error("unknown platform: {name}")]
    UnknownPlatform { name: String },
}
