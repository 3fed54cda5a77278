//! Vector Domain Library
//!
//! This module provides the vector-index side of the knowledge pipeline:
//! a Qdrant-backed nearest-neighbor index over chunk embeddings plus the
//! embedding provider used to produce them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   VectorIndex   │     │ EmbeddingProvider │
//! │    (trait)      │     │     (trait)       │
//! └────────┬────────┘     └────────┬──────────┘
//!          │                       │
//! ┌────────▼────────┐     ┌────────▼──────────┐
//! │   QdrantIndex   │     │  OpenAIProvider   │
//! │ (implementation)│     │ (implementation)  │
//! └─────────────────┘     └───────────────────┘
//! ```
//!
//! # Multi-tenancy
//!
//! All tenants share one collection; isolation is enforced by a mandatory
//! `tenant_id` payload filter on every search and delete. The index is the
//! authority on similarity ranking, never on content.
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_vector::{QdrantConfig, QdrantIndex, VectorIndex};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QdrantConfig::from_env()?;
//! let index = QdrantIndex::new(config).await?;
//!
//! // Dimensionality is fixed on first use
//! index.ensure_collection(1536).await?;
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod index;
pub mod models;
pub mod qdrant;

// Re-export commonly used types
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{VectorError, VectorResult};
pub use models::{ChunkPayload, ChunkPoint, ScoredChunk};
pub use qdrant::{QdrantConfig, QdrantIndex};

pub use index::VectorIndex;

#[cfg(any(test, feature = "mocks"))]
pub use embedding::MockEmbeddingProvider;
#[cfg(any(test, feature = "mocks"))]
pub use index::MockVectorIndex;
