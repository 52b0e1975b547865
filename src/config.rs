//! Configuration for the law-rag service
//!
//! All settings live in one explicit struct passed into the pipeline and
//! provider constructors. There is no process-wide mutable state: the config
//! is built once at startup and shared read-only.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Source document configuration
    pub document: DocumentConfig,
    /// OpenAI provider configuration
    pub openai: OpenAiConfig,
    /// Section extraction configuration
    pub extraction: ExtractionConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
}

impl RagConfig {
    /// Build configuration from the process environment.
    ///
    /// Fails with `Error::Config` when `OPENAI_API_KEY` is not set, so a
    /// misconfigured deployment refuses to start instead of failing per query.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY environment variable not set".into()))?;

        let mut config = Self::default();
        config.openai.api_key = api_key;

        if let Ok(path) = std::env::var("LAW_RAG_DOCUMENT") {
            config.document.path = PathBuf::from(&path);
            config.document.source_file = path;
        }
        if let Ok(port) = std::env::var("LAW_RAG_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid LAW_RAG_PORT: {}", port)))?;
        }

        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// Source document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Filesystem path to the PDF
    pub path: PathBuf,
    /// Label attached to documents and citations as the source file
    pub source_file: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("docs/laws.pdf"),
            source_file: "docs/laws.pdf".to_string(),
        }
    }
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (from `OPENAI_API_KEY`)
    #[serde(skip_serializing, default)]
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Model used for structured section extraction
    pub extraction_model: String,
    /// Model used for answer generation
    pub generate_model: String,
    /// Sampling temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            embed_model: "text-embedding-3-small".to_string(),
            extraction_model: "gpt-4o-mini".to_string(),
            generate_model: "gpt-5".to_string(),
            temperature: 0.1,
            timeout_secs: 120,
        }
    }
}

/// Section extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Size of each extraction window in characters. The flattened document
    /// text is split into consecutive windows of this size and one extraction
    /// call is issued per window, so the full document is covered.
    pub window_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { window_chars: 4000 }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per query
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = RagConfig::default();
        assert_eq!(config.retrieval.top_k, 2);
        assert_eq!(config.extraction.window_chars, 4000);
        assert_eq!(config.document.source_file, "docs/laws.pdf");
    }
}
