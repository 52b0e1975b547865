//! Error types for the law-rag pipeline

use thiserror::Error;

/// Result type alias for law-rag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the document-to-citation pipeline.
///
/// Every variant carries a human-readable cause. The query orchestrator is the
/// single collapse boundary: it matches exhaustively over these variants and
/// folds each into a degraded but well-formed `QueryResult`, so the HTTP
/// surface never returns a non-200 status for a pipeline failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration (e.g. absent API credential).
    /// Raised at service construction, before any pipeline work.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The source PDF is missing or not a valid PDF container
    #[error("Document read failed: {0}")]
    DocumentRead(String),

    /// The extraction model's reply could not be parsed as the expected JSON array
    #[error("LLM extraction failed: {0}")]
    ExtractionFormat(String),

    /// Embedding provider request failed
    #[error("Embedding request failed: {0}")]
    Embedding(String),

    /// Generation/extraction model request failed
    #[error("LLM request failed: {0}")]
    Llm(String),

    /// Vector store insert or search failed
    #[error("Retrieval failed: {0}")]
    Retrieval(String),
}
