use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored document. Immutable after ingest; deletion is whole-document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub tenant_id: String,
    pub source: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A bounded, possibly overlapping substring of a document's text; the atomic
/// unit that gets embedded and indexed. Its id doubles as the vector-index
/// point id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub tenant_id: String,
    pub chunk_index: u32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a document row; the id is generated by the ingestion
/// coordinator before any write.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub id: Uuid,
    pub tenant_id: String,
    pub source: String,
    pub title: String,
    pub content: String,
}

/// Input for batch-inserting chunk rows. Carries the chunk id explicitly so
/// the same id keys the vector-index point.
#[derive(Debug, Clone)]
pub struct NewChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub tenant_id: String,
    pub chunk_index: u32,
    pub content: String,
}

/// Caller-facing ingestion input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngestDocument {
    /// Free-form category tag, e.g. "policy", "menu", "manual"
    #[validate(length(min = 1, message = "source must not be empty"))]
    pub source: String,

    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

/// Result of a successful ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub document_id: Uuid,
    pub chunk_count: usize,
}

/// A ranked retrieval result, hydrated from the relational store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: f32,
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub source: String,
    pub title: String,
    pub chunk_index: u32,
    pub content: String,
}

/// Reference to a chunk that contributed to a generated answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub source: String,
    pub title: String,
    pub chunk_index: u32,
    pub score: f32,
}

impl From<&SearchHit> for Citation {
    fn from(hit: &SearchHit) -> Self {
        Self {
            chunk_id: hit.chunk_id,
            document_id: hit.document_id,
            source: hit.source.clone(),
            title: hit.title.clone(),
            chunk_index: hit.chunk_index,
            score: hit.score,
        }
    }
}

/// Answer synthesized from retrieved context, with its supporting chunks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub citations: Vec<Citation>,
}
