use core_config::{env_or_default, env_parsed_or_default, env_required, ConfigError, FromEnv};

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    /// Name of the shared collection holding every tenant's chunks
    pub collection: String,
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            collection: "knowledge_chunks".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl FromEnv for QdrantConfig {
    /// Load from `QDRANT_URL` (required), `QDRANT_API_KEY`,
    /// `QDRANT_COLLECTION` and `QDRANT_TIMEOUT_SECS`.
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("QDRANT_URL")?;
        let api_key = std::env::var("QDRANT_API_KEY").ok();
        let collection = env_or_default("QDRANT_COLLECTION", "knowledge_chunks");
        let timeout_secs = env_parsed_or_default("QDRANT_TIMEOUT_SECS", 30)?;

        Ok(Self {
            url,
            api_key,
            collection,
            timeout_secs,
        })
    }
}
