use async_trait::async_trait;

use crate::error::VectorResult;

/// Trait for embedding generation providers
///
/// The contract is strict: one vector per input text, same order, fixed
/// dimensionality across calls within a deployment. Mixing embedding models
/// between ingest and query silently degrades ranking, so a deployment runs
/// exactly one active model.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Name of the active embedding model
    fn model_name(&self) -> String;

    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>>;

    /// Generate embeddings for multiple texts in one provider round-trip
    async fn embed_batch(&self, texts: &[String]) -> VectorResult<Vec<Vec<f32>>>;
}
