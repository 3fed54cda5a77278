use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use domain_vector::{ChunkPayload, ChunkPoint, EmbeddingProvider, VectorIndex};

use crate::chunker::ChunkingConfig;
use crate::error::{KnowledgeError, KnowledgeResult};
use crate::models::{IngestDocument, IngestReceipt, NewChunk, NewDocument};
use crate::repository::DocumentRepository;
use crate::seed::seed_documents;

/// Write path of the pipeline: chunk, persist, embed, index.
///
/// The relational writes land before any index write and there is no rollback
/// on a later failure. A document whose index write failed is visible in the
/// relational store but unreachable through search; retrying the ingest
/// creates a fresh document under a new id.
#[derive(Clone)]
pub struct IngestionService<R, V, E>
where
    R: DocumentRepository,
    V: VectorIndex,
    E: EmbeddingProvider,
{
    repository: Arc<R>,
    index: Arc<V>,
    embedder: Arc<E>,
    chunking: ChunkingConfig,
}

impl<R, V, E> IngestionService<R, V, E>
where
    R: DocumentRepository,
    V: VectorIndex,
    E: EmbeddingProvider,
{
    pub fn new(repository: R, index: V, embedder: E, chunking: ChunkingConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            index: Arc::new(index),
            embedder: Arc::new(embedder),
            chunking,
        }
    }

    /// Ingest one document for a tenant and return its id and chunk count.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn ingest(
        &self,
        tenant_id: &str,
        input: IngestDocument,
    ) -> KnowledgeResult<IngestReceipt> {
        input
            .validate()
            .map_err(|e| KnowledgeError::Validation(e.to_string()))?;
        self.chunking.validate()?;

        let texts = self.chunking.split(&input.content)?;

        let document = self
            .repository
            .insert_document(NewDocument {
                id: Uuid::new_v4(),
                tenant_id: tenant_id.to_string(),
                source: input.source,
                title: input.title,
                content: input.content,
            })
            .await?;

        let chunks: Vec<NewChunk> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| NewChunk {
                id: Uuid::new_v4(),
                document_id: document.id,
                tenant_id: tenant_id.to_string(),
                chunk_index: index as u32,
                content: text.clone(),
            })
            .collect();

        self.repository.insert_chunks(chunks.clone()).await?;

        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(KnowledgeError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let dimension = embeddings
            .first()
            .ok_or_else(|| KnowledgeError::Embedding("No embeddings returned".to_string()))?
            .len() as u64;
        self.index.ensure_collection(dimension).await?;

        let points: Vec<ChunkPoint> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, vector)| {
                ChunkPoint::new(
                    chunk.id,
                    vector,
                    ChunkPayload {
                        document_id: document.id,
                        chunk_id: chunk.id,
                        tenant_id: chunk.tenant_id.clone(),
                        chunk_index: chunk.chunk_index,
                        text: chunk.content.clone(),
                        title: document.title.clone(),
                        source: document.source.clone(),
                    },
                )
            })
            .collect();

        self.index.upsert(points).await?;

        tracing::info!(
            tenant_id,
            document_id = %document.id,
            chunks = chunks.len(),
            model = %self.embedder.model_name(),
            "Ingested document"
        );

        Ok(IngestReceipt {
            document_id: document.id,
            chunk_count: chunks.len(),
        })
    }

    /// Ingest the fixed demo dataset for a tenant.
    #[instrument(skip(self))]
    pub async fn ingest_seed(&self, tenant_id: &str) -> KnowledgeResult<Vec<IngestReceipt>> {
        let mut receipts = Vec::new();
        for document in seed_documents() {
            receipts.push(self.ingest(tenant_id, document).await?);
        }
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain_vector::{MockEmbeddingProvider, MockVectorIndex};
    use mockall::predicate::eq;

    use crate::models::Document;
    use crate::repository::MockDocumentRepository;

    fn stored(document: NewDocument) -> Document {
        Document {
            id: document.id,
            tenant_id: document.tenant_id,
            source: document.source,
            title: document.title,
            content: document.content,
            created_at: Utc::now(),
        }
    }

    fn input() -> IngestDocument {
        IngestDocument {
            source: "policy".to_string(),
            title: "Hours".to_string(),
            content: "abcdefghij".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ingest_persists_chunks_and_indexes_them() {
        let mut repo = MockDocumentRepository::new();
        let mut index = MockVectorIndex::new();
        let mut embedder = MockEmbeddingProvider::new();

        // chunk_size 5, overlap 2 over 10 chars yields 3 chunks
        repo.expect_insert_document()
            .withf(|d| d.tenant_id == "t1" && d.title == "Hours")
            .returning(|d| Ok(stored(d)));
        repo.expect_insert_chunks()
            .withf(|chunks| {
                chunks.len() == 3
                    && chunks.iter().enumerate().all(|(i, c)| {
                        c.tenant_id == "t1" && c.chunk_index == i as u32
                    })
            })
            .returning(|_| Ok(()));

        embedder
            .expect_embed_batch()
            .withf(|texts| texts == ["abcde", "defgh", "ghij"])
            .returning(|texts| Ok(texts.iter().map(|_| vec![0.1, 0.2]).collect()));
        embedder
            .expect_model_name()
            .returning(|| "test-embedding".to_string());

        index
            .expect_ensure_collection()
            .with(eq(2u64))
            .returning(|_| Ok(()));
        index
            .expect_upsert()
            .withf(|points| {
                points.len() == 3
                    && points
                        .iter()
                        .all(|p| p.id == p.payload.chunk_id && p.payload.tenant_id == "t1")
            })
            .returning(|_| Ok(()));

        let service =
            IngestionService::new(repo, index, embedder, ChunkingConfig::new(5, 2));
        let receipt = service.ingest("t1", input()).await.unwrap();

        assert_eq!(receipt.chunk_count, 3);
    }

    #[tokio::test]
    async fn test_ingest_rejects_empty_content_before_any_write() {
        let mut repo = MockDocumentRepository::new();
        let index = MockVectorIndex::new();
        let embedder = MockEmbeddingProvider::new();

        repo.expect_insert_document().times(0);

        let service =
            IngestionService::new(repo, index, embedder, ChunkingConfig::default());
        let result = service
            .ingest(
                "t1",
                IngestDocument {
                    source: "policy".to_string(),
                    title: "Hours".to_string(),
                    content: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(KnowledgeError::Validation(_))));
    }

    #[tokio::test]
    async fn test_ingest_rejects_invalid_chunking_before_any_write() {
        let mut repo = MockDocumentRepository::new();
        let index = MockVectorIndex::new();
        let embedder = MockEmbeddingProvider::new();

        repo.expect_insert_document().times(0);

        let service =
            IngestionService::new(repo, index, embedder, ChunkingConfig::new(5, 7));
        let result = service.ingest("t1", input()).await;

        assert!(matches!(result, Err(KnowledgeError::Config(_))));
    }

    #[tokio::test]
    async fn test_embedding_count_mismatch_aborts_before_index_write() {
        let mut repo = MockDocumentRepository::new();
        let mut index = MockVectorIndex::new();
        let mut embedder = MockEmbeddingProvider::new();

        repo.expect_insert_document().returning(|d| Ok(stored(d)));
        repo.expect_insert_chunks().returning(|_| Ok(()));

        // one embedding for three chunks
        embedder
            .expect_embed_batch()
            .returning(|_| Ok(vec![vec![0.1, 0.2]]));

        index.expect_ensure_collection().times(0);
        index.expect_upsert().times(0);

        let service =
            IngestionService::new(repo, index, embedder, ChunkingConfig::new(5, 2));
        let result = service.ingest("t1", input()).await;

        assert!(matches!(result, Err(KnowledgeError::Embedding(_))));
    }

    #[tokio::test]
    async fn test_index_failure_surfaces_after_relational_writes() {
        let mut repo = MockDocumentRepository::new();
        let mut index = MockVectorIndex::new();
        let mut embedder = MockEmbeddingProvider::new();

        repo.expect_insert_document().returning(|d| Ok(stored(d)));
        repo.expect_insert_chunks().times(1).returning(|_| Ok(()));
        embedder
            .expect_embed_batch()
            .returning(|texts| Ok(texts.iter().map(|_| vec![0.5]).collect()));
        index.expect_ensure_collection().returning(|_| Ok(()));
        index.expect_upsert().returning(|_| {
            Err(domain_vector::VectorError::Qdrant(
                "connection refused".to_string(),
            ))
        });

        let service =
            IngestionService::new(repo, index, embedder, ChunkingConfig::new(5, 2));
        let result = service.ingest("t1", input()).await;

        // relational writes stay in place, the error reaches the caller
        assert!(matches!(result, Err(KnowledgeError::VectorIndex(_))));
    }

    #[tokio::test]
    async fn test_retry_after_failure_uses_a_fresh_document_id() {
        let inserted: Arc<std::sync::Mutex<Vec<Uuid>>> = Arc::new(std::sync::Mutex::new(vec![]));

        let mut repo = MockDocumentRepository::new();
        let mut index = MockVectorIndex::new();
        let mut embedder = MockEmbeddingProvider::new();

        let seen = inserted.clone();
        repo.expect_insert_document().times(2).returning(move |d| {
            seen.lock().unwrap().push(d.id);
            Ok(stored(d))
        });
        repo.expect_insert_chunks().returning(|_| Ok(()));
        embedder
            .expect_embed_batch()
            .returning(|texts| Ok(texts.iter().map(|_| vec![0.5]).collect()));
        embedder
            .expect_model_name()
            .returning(|| "test-embedding".to_string());
        index.expect_ensure_collection().returning(|_| Ok(()));

        // first upsert fails, second succeeds
        let mut seq = mockall::Sequence::new();
        index
            .expect_upsert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(domain_vector::VectorError::Qdrant("timeout".to_string()))
            });
        index
            .expect_upsert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service =
            IngestionService::new(repo, index, embedder, ChunkingConfig::new(5, 2));
        assert!(service.ingest("t1", input()).await.is_err());
        let receipt = service.ingest("t1", input()).await.unwrap();

        let ids = inserted.lock().unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(receipt.document_id, ids[1]);
    }

    #[tokio::test]
    async fn test_seed_ingests_every_document() {
        let mut repo = MockDocumentRepository::new();
        let mut index = MockVectorIndex::new();
        let mut embedder = MockEmbeddingProvider::new();

        let total = seed_documents().len();

        repo.expect_insert_document()
            .times(total)
            .returning(|d| Ok(stored(d)));
        repo.expect_insert_chunks().returning(|_| Ok(()));
        embedder
            .expect_embed_batch()
            .returning(|texts| Ok(texts.iter().map(|_| vec![0.1]).collect()));
        embedder
            .expect_model_name()
            .returning(|| "test-embedding".to_string());
        index.expect_ensure_collection().returning(|_| Ok(()));
        index.expect_upsert().returning(|_| Ok(()));

        let service =
            IngestionService::new(repo, index, embedder, ChunkingConfig::default());
        let receipts = service.ingest_seed("demo").await.unwrap();

        assert_eq!(receipts.len(), total);
    }
}
