//! The text-generation boundary.
//!
//! Generation is an external collaborator: the service hands it the user's
//! text plus conditioning examples and stores whatever comes back verbatim.
//! Prompt wording and output quality live entirely behind this trait.

use async_trait::async_trait;
use sculptor_types::Platform;
use thiserror::Error;

/// Errors from the upstream text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Authentication with the upstream service failed.
    #[error("generation auth failed: {0}")]
    Auth(String),

    /// The upstream service rate-limited the request.
    #[error("generation rate limited: {0}")]
    RateLimited(String),

    /// Any other upstream failure (network, model error, ...).
    #[error("generation failed: {0}")]
    Upstream(String),
}

/// An opaque platform-tailored rewrite service.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Produces a platform-tailored rewrite of `text`, conditioned on the
    /// platform's style examples.
    async fn generate(
        &self,
        text: &str,
        platform: Platform,
        examples: &[String],
        temperature: f64,
    ) -> Result<String, GenerationError>;
}
