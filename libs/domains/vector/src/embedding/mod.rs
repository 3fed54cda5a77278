//! Embedding generation providers

mod openai;
mod provider;

pub use openai::{OpenAIConfig, OpenAIProvider};
pub use provider::EmbeddingProvider;

#[cfg(any(test, feature = "mocks"))]
pub use provider::MockEmbeddingProvider;
