use async_trait::async_trait;
use uuid::Uuid;

use crate::error::VectorResult;
use crate::models::{ChunkPoint, ScoredChunk};

/// Trait for the tenant-filtered nearest-neighbor index over chunk embeddings.
///
/// Implementations share a single collection across tenants; isolation is a
/// payload-filter obligation on every read and delete, never a separate
/// physical store per tenant.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create the collection on first use with the given dimensionality and a
    /// cosine-similarity metric.
    ///
    /// Idempotent when the collection already exists with the same
    /// dimensionality; a differing dimensionality is a configuration error,
    /// not silently tolerated.
    async fn ensure_collection(&self, dimension: u64) -> VectorResult<()>;

    /// Idempotently upsert points, keyed by chunk id.
    async fn upsert(&self, points: Vec<ChunkPoint>) -> VectorResult<()>;

    /// Top-k nearest-neighbor search restricted to points whose `tenant_id`
    /// payload equals `tenant_id`. Results arrive ordered by descending
    /// score; ties keep the index's native order.
    async fn search(
        &self,
        tenant_id: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> VectorResult<Vec<ScoredChunk>>;

    /// Delete every point matching `(document_id, tenant_id)` by payload
    /// filter. Filter-based deletion also sweeps orphan points left behind by
    /// a prior partial ingest, so it is robust to store drift.
    async fn delete_by_document(&self, tenant_id: &str, document_id: Uuid) -> VectorResult<()>;
}
