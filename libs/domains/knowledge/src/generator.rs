use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use core_config::{env_or_default, env_parsed_or_default, env_required, ConfigError, FromEnv};

use crate::error::{KnowledgeError, KnowledgeResult};

/// Fixed answer returned when retrieval produced no context. Also what the
/// model is instructed to say when the provided context does not cover the
/// question.
pub const INSUFFICIENT_CONTEXT_ANSWER: &str = "I don't have enough information to answer that.";

const SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer strictly from the provided \
context passages. If the context does not contain the answer, reply exactly: \
\"I don't have enough information to answer that.\"";

/// Chat completion configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 250,
            temperature: 0.3,
        }
    }
}

impl FromEnv for ChatConfig {
    /// Load from `OPENAI_API_KEY` (required), `OPENAI_BASE_URL`, `CHAT_MODEL`
    /// and `CHAT_MAX_TOKENS`.
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("OPENAI_API_KEY")?;
        let base_url = env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1");
        let model = env_or_default("CHAT_MODEL", "gpt-4o-mini");
        let max_tokens = env_parsed_or_default("CHAT_MAX_TOKENS", 250)?;

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            temperature: 0.3,
        })
    }
}

/// Synthesizes a grounded answer from a question and retrieved context
/// passages. The coordinator never calls this with an empty context.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, question: &str, contexts: &[String]) -> KnowledgeResult<String>;
}

/// OpenAI chat completions backed generator
pub struct OpenAIGenerator {
    client: Client,
    config: ChatConfig,
}

impl OpenAIGenerator {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> KnowledgeResult<Self> {
        Ok(Self::new(ChatConfig::from_env()?))
    }
}

/// Number the passages so the model can refer back to them
fn build_context(contexts: &[String]) -> String {
    contexts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("[Context {}]\n{}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl AnswerGenerator for OpenAIGenerator {
    async fn generate(&self, question: &str, contexts: &[String]) -> KnowledgeResult<String> {
        let user_prompt = format!(
            "Context:\n{}\n\nQuestion: {}",
            build_context(contexts),
            question
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| KnowledgeError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Generation(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| KnowledgeError::Generation(e.to_string()))?;

        let answer = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| INSUFFICIENT_CONTEXT_ANSWER.to_string());

        Ok(answer)
    }
}
