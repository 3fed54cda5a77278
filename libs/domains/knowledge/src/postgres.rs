use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::{chunks, documents, ChunksEntity, DocumentsEntity};
use crate::error::KnowledgeResult;
use crate::models::{Chunk, Document, NewChunk, NewDocument};
use crate::repository::DocumentRepository;

/// PostgreSQL implementation of DocumentRepository
#[derive(Clone)]
pub struct PgDocumentRepository {
    db: DatabaseConnection,
}

impl PgDocumentRepository {
    /// Create a new PostgreSQL document repository
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<NewDocument> for documents::ActiveModel {
    fn from(input: NewDocument) -> Self {
        Self {
            id: Set(input.id),
            tenant_id: Set(input.tenant_id),
            source: Set(input.source),
            title: Set(input.title),
            content: Set(input.content),
            created_at: NotSet,
        }
    }
}

impl From<NewChunk> for chunks::ActiveModel {
    fn from(input: NewChunk) -> Self {
        Self {
            id: Set(input.id),
            document_id: Set(input.document_id),
            tenant_id: Set(input.tenant_id),
            chunk_index: Set(input.chunk_index as i32),
            content: Set(input.content),
            created_at: NotSet,
        }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert_document(&self, document: NewDocument) -> KnowledgeResult<Document> {
        let model: documents::ActiveModel = document.into();
        let result = model.insert(&self.db).await?.into();
        Ok(result)
    }

    async fn insert_chunks(&self, chunks: Vec<NewChunk>) -> KnowledgeResult<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let models: Vec<chunks::ActiveModel> = chunks.into_iter().map(Into::into).collect();
        ChunksEntity::insert_many(models).exec(&self.db).await?;
        Ok(())
    }

    async fn find_document(
        &self,
        tenant_id: &str,
        document_id: Uuid,
    ) -> KnowledgeResult<Option<Document>> {
        let result = DocumentsEntity::find_by_id(document_id)
            .filter(documents::Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn list_documents(&self, tenant_id: &str) -> KnowledgeResult<Vec<Document>> {
        let results = DocumentsEntity::find()
            .filter(documents::Column::TenantId.eq(tenant_id))
            .order_by_desc(documents::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(results)
    }

    async fn count_documents(&self, tenant_id: &str) -> KnowledgeResult<u64> {
        let count = DocumentsEntity::find()
            .filter(documents::Column::TenantId.eq(tenant_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn find_chunk_with_document(
        &self,
        tenant_id: &str,
        chunk_id: Uuid,
    ) -> KnowledgeResult<Option<(Chunk, Document)>> {
        let result = ChunksEntity::find_by_id(chunk_id)
            .filter(chunks::Column::TenantId.eq(tenant_id))
            .find_also_related(DocumentsEntity)
            .one(&self.db)
            .await?;

        Ok(result.and_then(|(chunk, document)| {
            document.map(|document| (chunk.into(), document.into()))
        }))
    }

    async fn chunk_ids_for_document(
        &self,
        tenant_id: &str,
        document_id: Uuid,
    ) -> KnowledgeResult<Vec<Uuid>> {
        let results = ChunksEntity::find()
            .filter(chunks::Column::TenantId.eq(tenant_id))
            .filter(chunks::Column::DocumentId.eq(document_id))
            .order_by_asc(chunks::Column::ChunkIndex)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|chunk| chunk.id)
            .collect();
        Ok(results)
    }

    async fn delete_document(&self, tenant_id: &str, document_id: Uuid) -> KnowledgeResult<bool> {
        let result = DocumentsEntity::delete_many()
            .filter(documents::Column::Id.eq(document_id))
            .filter(documents::Column::TenantId.eq(tenant_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
