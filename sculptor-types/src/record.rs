//! Stored content models.
//!
//! Both models are immutable once created: an [`Example`] or a
//! [`TransformationRecord`] is written exactly once and never updated.

use crate::{ExampleId, Platform, RecordId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Arbitrary JSON-serializable metadata attached to a transformation
/// (model name, temperature, example count, session id, ...).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A short style example used to condition generation for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Unique identifier.
    pub id: ExampleId,
    /// The platform this example belongs to.
    pub platform: Platform,
    /// Trimmed, non-empty example text.
    pub content: String,
    /// When the example was stored.
    pub created_at: Timestamp,
}

impl Example {
    /// Builds a new example, trimming the content.
    ///
    /// Fails with [`ValidationError::EmptyContent`] if the content is empty
    /// or whitespace-only after trimming.
    pub fn new(platform: Platform, content: &str) -> Result<Self, ValidationError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(Self {
            id: ExampleId::new(),
            platform,
            content: trimmed.to_string(),
            created_at: Timestamp::now(),
        })
    }
}

/// One original/transformed pair with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationRecord {
    /// Unique identifier.
    pub id: RecordId,
    /// The platform the text was transformed for.
    pub platform: Platform,
    /// The text the user submitted.
    pub original_text: String,
    /// The platform-tailored rewrite, stored verbatim.
    pub transformed_text: String,
    /// When the transformation was recorded.
    pub created_at: Timestamp,
    /// Free-form metadata (model, temperature, session id, ...).
    pub metadata: Metadata,
}

impl TransformationRecord {
    /// Builds a new record. Empty texts are allowed: validating generated
    /// output is the generation boundary's job, not the log's.
    #[must_use]
    pub fn new(
        platform: Platform,
        original_text: impl Into<String>,
        transformed_text: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            id: RecordId::new(),
            platform,
            original_text: original_text.into(),
            transformed_text: transformed_text.into(),
            created_at: Timestamp::now(),
            metadata,
        }
    }
}
