use async_trait::async_trait;
use uuid::Uuid;

use crate::error::KnowledgeResult;
use crate::models::{Chunk, Document, NewChunk, NewDocument};

/// Persistence seam for documents and chunks. Every read and delete takes the
/// tenant id; rows belonging to other tenants are invisible.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a document row and return the stored document
    async fn insert_document(&self, document: NewDocument) -> KnowledgeResult<Document>;

    /// Batch-insert the chunk rows for a document
    async fn insert_chunks(&self, chunks: Vec<NewChunk>) -> KnowledgeResult<()>;

    /// Fetch a document by id within a tenant
    async fn find_document(
        &self,
        tenant_id: &str,
        document_id: Uuid,
    ) -> KnowledgeResult<Option<Document>>;

    /// List all documents for a tenant, newest first
    async fn list_documents(&self, tenant_id: &str) -> KnowledgeResult<Vec<Document>>;

    /// Number of documents stored for a tenant
    async fn count_documents(&self, tenant_id: &str) -> KnowledgeResult<u64>;

    /// Fetch a chunk together with its parent document, both tenant-scoped
    async fn find_chunk_with_document(
        &self,
        tenant_id: &str,
        chunk_id: Uuid,
    ) -> KnowledgeResult<Option<(Chunk, Document)>>;

    /// Ids of all chunks belonging to a document within a tenant
    async fn chunk_ids_for_document(
        &self,
        tenant_id: &str,
        document_id: Uuid,
    ) -> KnowledgeResult<Vec<Uuid>>;

    /// Delete a document (chunk rows cascade). Returns false when no row
    /// matched the tenant/id pair.
    async fn delete_document(&self, tenant_id: &str, document_id: Uuid) -> KnowledgeResult<bool>;
}
