//! Vector store provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::document::IndexableDocument;

/// A retrieved chunk with its source document's metadata and similarity score
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched document, metadata included
    pub document: IndexableDocument,
    /// Similarity score, higher is more similar
    pub score: f32,
}

/// Trait for vector storage and similarity search.
///
/// Duplicate inserts are permitted; the store has no deduplication
/// obligation. A search that matches nothing returns an empty vec, not an
/// error, and results are capped at `min(top_k, stored documents)`.
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert a document with its embedding
    async fn insert(&self, document: IndexableDocument, embedding: Vec<f32>) -> Result<()>;

    /// Search for the documents most similar to the query embedding
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>>;

    /// Number of documents stored
    async fn len(&self) -> usize;

    /// True when nothing has been inserted
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
