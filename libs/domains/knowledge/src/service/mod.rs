//! Coordinators over the repository, the vector index, the embedding
//! provider and the answer generator. Each takes its collaborators by value
//! and owns them behind `Arc`, so handles are injected rather than ambient.

pub mod deletion;
pub mod ingestion;
pub mod retrieval;

pub use deletion::DeletionService;
pub use ingestion::IngestionService;
pub use retrieval::RetrievalService;
