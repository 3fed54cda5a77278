//! Qdrant-backed implementation of the vector index

mod config;
mod index;

pub use config::QdrantConfig;
pub use index::QdrantIndex;
