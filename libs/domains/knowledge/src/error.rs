use domain_vector::VectorError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Answer generation error: {0}")]
    Generation(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

impl From<sea_orm::DbErr> for KnowledgeError {
    fn from(err: sea_orm::DbErr) -> Self {
        KnowledgeError::Database(err.to_string())
    }
}

impl From<VectorError> for KnowledgeError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::Config(msg) => KnowledgeError::Config(msg),
            VectorError::Embedding(msg) => KnowledgeError::Embedding(msg),
            VectorError::Qdrant(msg) | VectorError::Internal(msg) => {
                KnowledgeError::VectorIndex(msg)
            }
        }
    }
}

impl From<core_config::ConfigError> for KnowledgeError {
    fn from(err: core_config::ConfigError) -> Self {
        KnowledgeError::Config(err.to_string())
    }
}
