use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload field carrying the tenant partition key; every search and delete
/// must filter on it.
pub const TENANT_ID_KEY: &str = "tenant_id";

/// Payload field carrying the owning document id; deletion filters on it
/// together with [`TENANT_ID_KEY`].
pub const DOCUMENT_ID_KEY: &str = "document_id";

/// Denormalized payload stored with every point.
///
/// The text duplicated here also lives in the relational store; keeping it on
/// the point lets retrieval serve from the index alone if hydration is
/// temporarily unavailable, at the cost of both stores needing the same
/// write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub document_id: Uuid,
    pub chunk_id: Uuid,
    pub tenant_id: String,
    pub chunk_index: u32,
    pub text: String,
    pub title: String,
    pub source: String,
}

/// A point to upsert: the chunk id doubles as the point id, giving a direct
/// 1:1 mapping between a relational row and an index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPoint {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: ChunkPayload,
}

impl ChunkPoint {
    pub fn new(id: Uuid, vector: Vec<f32>, payload: ChunkPayload) -> Self {
        Self {
            id,
            vector,
            payload,
        }
    }
}

/// A search hit, ordered by descending similarity score.
///
/// `payload` is `None` when the stored point carries an unreadable payload;
/// callers treat such hits as inconsistent and drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub id: Uuid,
    pub score: f32,
    pub payload: Option<ChunkPayload>,
}

impl ScoredChunk {
    pub fn new(id: Uuid, score: f32, payload: Option<ChunkPayload>) -> Self {
        Self { id, score, payload }
    }
}
