//! Provider traits — the abstractions over the two external models.
//!
//! The embedding model and the generation model are opaque, fallible,
//! latency-variable collaborators. The engine owns its own timeout and
//! give-up policy; implementations should not block forever but are
//! otherwise free to be as slow as the backing service.

use crate::error::ProviderError;
use async_trait::async_trait;

/// Converts text into a fixed-dimension vector.
///
/// Must be deterministic for identical text and model version; vectors
/// from different model versions are not comparable.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, ProviderError>;
}

/// Converts a prompt into free-text output.
///
/// May truncate or vary output across calls; failures are expected and
/// must be recoverable by the caller.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Generate a response for the given prompt.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, ProviderError>;
}
