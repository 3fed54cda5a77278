//! Knowledge Domain
//!
//! This module provides the ingestion-and-retrieval core of the RAG pipeline:
//! chunking, the write path that keeps the relational store and the vector
//! index mutually consistent per tenant, and the read path that performs
//! tenant-scoped nearest-neighbor retrieval and reassembles ranked results.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┬────────────────────┬───────────────────┐
//! │ IngestionService  │ RetrievalService   │ DeletionService   │
//! └─────────┬─────────┴─────────┬──────────┴─────────┬─────────┘
//!           │                   │                    │
//! ┌─────────▼─────────┐ ┌───────▼──────────┐ ┌───────▼─────────┐
//! │ DocumentRepository│ │   VectorIndex    │ │ EmbeddingProvider│
//! │     (trait)       │ │    (trait)       │ │ AnswerGenerator  │
//! └─────────┬─────────┘ └───────┬──────────┘ │    (traits)      │
//!           │                   │            └──────────────────┘
//! ┌─────────▼─────────┐ ┌───────▼──────────┐
//! │ PgDocumentRepo    │ │   QdrantIndex    │
//! └───────────────────┘ └──────────────────┘
//! ```
//!
//! # Consistency
//!
//! The relational store is ingest-of-record; the vector index is derived and
//! may lag or be incomplete. Ingestion writes the document row before its
//! chunk rows and both before any index write; a failure after the relational
//! writes leaves an inspectable, retry-safe partial state rather than rolling
//! back. Every read and delete filters by tenant id in both stores.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_knowledge::{
//!     ChunkingConfig, IngestDocument, IngestionService, PgDocumentRepository,
//! };
//! use domain_vector::{OpenAIProvider, QdrantConfig, QdrantIndex};
//! use core_config::FromEnv;
//!
//! # async fn example(db: sea_orm::DatabaseConnection) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = PgDocumentRepository::new(db);
//! let index = QdrantIndex::new(QdrantConfig::from_env()?).await?;
//! let embedder = OpenAIProvider::from_env()?;
//!
//! let ingestion = IngestionService::new(repository, index, embedder, ChunkingConfig::default());
//! let receipt = ingestion
//!     .ingest(
//!         "t1",
//!         IngestDocument {
//!             source: "policy".into(),
//!             title: "Hours".into(),
//!             content: "Open 9-5 Mon-Fri".into(),
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod chunker;
pub mod entity;
pub mod error;
pub mod generator;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use chunker::ChunkingConfig;
pub use error::{KnowledgeError, KnowledgeResult};
pub use generator::{
    AnswerGenerator, ChatConfig, OpenAIGenerator, INSUFFICIENT_CONTEXT_ANSWER,
};
pub use models::{
    ChatAnswer, Chunk, Citation, Document, IngestDocument, IngestReceipt, NewChunk, NewDocument,
    SearchHit,
};
pub use postgres::PgDocumentRepository;
pub use repository::DocumentRepository;
pub use service::{DeletionService, IngestionService, RetrievalService};
