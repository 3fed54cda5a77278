use std::sync::Arc;

use tracing::instrument;

use domain_vector::{EmbeddingProvider, ScoredChunk, VectorIndex};

use crate::error::{KnowledgeError, KnowledgeResult};
use crate::generator::{AnswerGenerator, INSUFFICIENT_CONTEXT_ANSWER};
use crate::models::{ChatAnswer, Citation, Document, SearchHit};
use crate::repository::DocumentRepository;

/// Read path of the pipeline: embed the query, search the index within the
/// tenant, hydrate hits from the relational store, optionally synthesize an
/// answer.
#[derive(Clone)]
pub struct RetrievalService<R, V, E, G>
where
    R: DocumentRepository,
    V: VectorIndex,
    E: EmbeddingProvider,
    G: AnswerGenerator,
{
    repository: Arc<R>,
    index: Arc<V>,
    embedder: Arc<E>,
    generator: Arc<G>,
}

impl<R, V, E, G> RetrievalService<R, V, E, G>
where
    R: DocumentRepository,
    V: VectorIndex,
    E: EmbeddingProvider,
    G: AnswerGenerator,
{
    pub fn new(repository: R, index: V, embedder: E, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            index: Arc::new(index),
            embedder: Arc::new(embedder),
            generator: Arc::new(generator),
        }
    }

    /// Tenant-scoped top-k retrieval, hydrated from the relational store.
    ///
    /// The index already filters by tenant; the payload and the relational
    /// lookup are rechecked anyway, and any hit whose row is missing or
    /// belongs to another tenant is dropped without disturbing the rank of
    /// the remaining hits. Fewer than `top_k` results is a normal outcome.
    #[instrument(skip(self, query))]
    pub async fn search(
        &self,
        tenant_id: &str,
        query: &str,
        top_k: u64,
    ) -> KnowledgeResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(KnowledgeError::Validation(
                "query must not be empty".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(KnowledgeError::Validation(
                "top_k must be positive".to_string(),
            ));
        }

        let vector = self.embedder.embed(query).await?;
        tracing::debug!(
            tenant_id,
            model = %self.embedder.model_name(),
            "Embedded query"
        );
        let scored = self.index.search(tenant_id, vector, top_k).await?;

        let mut hits = Vec::with_capacity(scored.len());
        for chunk in scored {
            if let Some(hit) = self.hydrate(tenant_id, &chunk).await? {
                hits.push(hit);
            }
        }

        Ok(hits)
    }

    /// Resolve one scored point against the relational store. `None` means
    /// the hit is stale or crosses a tenant boundary and must be dropped.
    async fn hydrate(
        &self,
        tenant_id: &str,
        chunk: &ScoredChunk,
    ) -> KnowledgeResult<Option<SearchHit>> {
        match &chunk.payload {
            Some(payload) if payload.tenant_id == tenant_id => {}
            Some(payload) => {
                tracing::warn!(
                    tenant_id,
                    chunk_id = %chunk.id,
                    payload_tenant = %payload.tenant_id,
                    "Dropping hit with mismatched tenant payload"
                );
                return Ok(None);
            }
            None => {
                tracing::warn!(tenant_id, chunk_id = %chunk.id, "Dropping hit without payload");
                return Ok(None);
            }
        }

        let Some((row, document)) = self
            .repository
            .find_chunk_with_document(tenant_id, chunk.id)
            .await?
        else {
            tracing::warn!(
                tenant_id,
                chunk_id = %chunk.id,
                "Dropping hit without a relational row"
            );
            return Ok(None);
        };

        Ok(Some(SearchHit {
            score: chunk.score,
            chunk_id: row.id,
            document_id: document.id,
            source: document.source,
            title: document.title,
            chunk_index: row.chunk_index,
            content: row.content,
        }))
    }

    /// Retrieval-augmented answer for a question.
    ///
    /// With zero usable hits the generator is never called; a fixed
    /// insufficient-context answer with no citations comes back instead.
    #[instrument(skip(self, question))]
    pub async fn chat(
        &self,
        tenant_id: &str,
        question: &str,
        top_k: u64,
    ) -> KnowledgeResult<ChatAnswer> {
        let hits = self.search(tenant_id, question, top_k).await?;

        if hits.is_empty() {
            return Ok(ChatAnswer {
                answer: INSUFFICIENT_CONTEXT_ANSWER.to_string(),
                citations: Vec::new(),
            });
        }

        let contexts: Vec<String> = hits.iter().map(|hit| hit.content.clone()).collect();
        let answer = self.generator.generate(question, &contexts).await?;
        let citations = hits.iter().map(Citation::from).collect();

        Ok(ChatAnswer { answer, citations })
    }

    /// All documents for a tenant, newest first.
    pub async fn list_documents(&self, tenant_id: &str) -> KnowledgeResult<Vec<Document>> {
        self.repository.list_documents(tenant_id).await
    }

    /// Number of documents a tenant has stored.
    pub async fn count_documents(&self, tenant_id: &str) -> KnowledgeResult<u64> {
        self.repository.count_documents(tenant_id).await
    }
}
