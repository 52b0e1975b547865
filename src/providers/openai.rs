//! OpenAI-backed providers for embeddings and LLM completion
//!
//! One shared HTTP client serves the embedding, extraction, and generation
//! models. The API key lives in the config struct and is never read from
//! mutable global state.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::OpenAiConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// Shared OpenAI HTTP client
#[derive(Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client from config. Fails with `Error::Config` when the API
    /// key is absent, before any request is attempted.
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config(
                "OPENAI_API_KEY environment variable not set".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// POST /embeddings for a batch of inputs
    pub async fn embeddings(&self, model: &str, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingsRequest {
            model: model.to_string(),
            input: inputs.to_vec(),
        };

        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("request error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!("HTTP {}: {}", status, body)));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("invalid response: {}", e)))?;

        let mut data = parsed.data;
        // The API does not guarantee input order
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }

    /// POST /chat/completions with a single user message
    pub async fn chat_completion(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("request error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("invalid response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Llm("No choices in completion response".into()))
    }
}

#[derive(serde::Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(serde::Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(serde::Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// OpenAI embedding provider
pub struct OpenAiEmbedder {
    client: Arc<OpenAiClient>,
    model: String,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.client.embeddings(&self.model, &[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::Embedding("Empty embedding response".into()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.client.embeddings(&self.model, texts).await
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// OpenAI LLM provider bound to one model
pub struct OpenAiLlm {
    client: Arc<OpenAiClient>,
    model: String,
    temperature: f32,
}

#[async_trait]
impl LlmProvider for OpenAiLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.client
            .chat_completion(&self.model, prompt, self.temperature)
            .await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Combined OpenAI provider sharing a single client across the embedding,
/// extraction, and generation models
pub struct OpenAiProvider {
    embedder: Arc<OpenAiEmbedder>,
    extraction_llm: Arc<OpenAiLlm>,
    generation_llm: Arc<OpenAiLlm>,
}

impl OpenAiProvider {
    /// Create providers from config
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let client = Arc::new(OpenAiClient::new(config)?);
        Ok(Self {
            embedder: Arc::new(OpenAiEmbedder {
                client: Arc::clone(&client),
                model: config.embed_model.clone(),
            }),
            extraction_llm: Arc::new(OpenAiLlm {
                client: Arc::clone(&client),
                model: config.extraction_model.clone(),
                temperature: 0.0,
            }),
            generation_llm: Arc::new(OpenAiLlm {
                client,
                model: config.generate_model.clone(),
                temperature: config.temperature,
            }),
        })
    }

    /// The embedding provider
    pub fn embedder(&self) -> Arc<OpenAiEmbedder> {
        Arc::clone(&self.embedder)
    }

    /// The model used for structured section extraction
    pub fn extraction_llm(&self) -> Arc<OpenAiLlm> {
        Arc::clone(&self.extraction_llm)
    }

    /// The model used for answer generation
    pub fn generation_llm(&self) -> Arc<OpenAiLlm> {
        Arc::clone(&self.generation_llm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_config_error() {
        let config = OpenAiConfig::default();
        let err = OpenAiClient::new(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
