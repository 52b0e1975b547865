//! Response types for the query endpoint

use serde::{Deserialize, Serialize};

/// Citation attached to an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Formatted source reference, e.g. "Law 1.1 (Peace) - Dispute Resolution"
    pub source: String,
    /// Excerpt from the source, truncated to 200 characters with a trailing
    /// "..." when truncated
    pub text: String,
}

/// The externally visible query result.
///
/// Success and degraded paths share this shape: failures are encoded in
/// `response` with empty citations, never as a non-200 HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The original query string
    pub query: String,
    /// Generated natural-language answer, or a degraded-mode message
    pub response: String,
    /// Citations in retrieval rank order, at most `top_k` entries
    pub citations: Vec<Citation>,
}

impl QueryResult {
    /// Result for a query that found no indexable documents
    pub fn no_documents(query: &str) -> Self {
        Self {
            query: query.to_string(),
            response: "No documents found to search through.".to_string(),
            citations: Vec::new(),
        }
    }

    /// Degraded result carrying the failure message in the response body
    pub fn degraded(query: &str, message: &str) -> Self {
        Self {
            query: query.to_string(),
            response: format!("Error processing query: {}", message),
            citations: Vec::new(),
        }
    }
}
