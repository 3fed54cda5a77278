use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use domain_vector::VectorIndex;

use crate::error::{KnowledgeError, KnowledgeResult};
use crate::repository::DocumentRepository;

/// Whole-document removal across both stores, relational first.
///
/// A crash between the two deletes leaves orphan points in the index; those
/// never surface (retrieval drops hits without a relational row) and the
/// filter-based index delete of a later retry sweeps them up.
#[derive(Clone)]
pub struct DeletionService<R, V>
where
    R: DocumentRepository,
    V: VectorIndex,
{
    repository: Arc<R>,
    index: Arc<V>,
}

impl<R, V> DeletionService<R, V>
where
    R: DocumentRepository,
    V: VectorIndex,
{
    pub fn new(repository: R, index: V) -> Self {
        Self {
            repository: Arc::new(repository),
            index: Arc::new(index),
        }
    }

    /// Delete a document, its chunk rows and its index points.
    ///
    /// An unknown or cross-tenant id fails with `NotFound` before any write.
    #[instrument(skip(self))]
    pub async fn delete(&self, tenant_id: &str, document_id: Uuid) -> KnowledgeResult<()> {
        self.repository
            .find_document(tenant_id, document_id)
            .await?
            .ok_or(KnowledgeError::NotFound(document_id))?;

        let chunk_ids = self
            .repository
            .chunk_ids_for_document(tenant_id, document_id)
            .await?;

        self.repository.delete_document(tenant_id, document_id).await?;
        self.index.delete_by_document(tenant_id, document_id).await?;

        tracing::info!(
            tenant_id,
            document_id = %document_id,
            chunks = chunk_ids.len(),
            "Deleted document"
        );

        Ok(())
    }
}
