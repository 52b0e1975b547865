//! In-memory vector store with brute-force cosine search
//!
//! The document sets here are small (one law corpus per source PDF), so a
//! linear scan over the stored vectors is faster than maintaining an ANN
//! index and keeps the store dependency-free.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::types::document::IndexableDocument;

use super::vector_store::{ScoredChunk, VectorStoreProvider};

/// In-memory vector store
#[derive(Default)]
pub struct InMemoryVectorStore {
    entries: RwLock<Vec<(IndexableDocument, Vec<f32>)>>,
}

impl InMemoryVectorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    async fn insert(&self, document: IndexableDocument, embedding: Vec<f32>) -> Result<()> {
        self.entries.write().push((document, embedding));
        Ok(())
    }

    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>> {
        let entries = self.entries.read();

        let mut scored: Vec<ScoredChunk> = entries
            .iter()
            .map(|(document, embedding)| ScoredChunk {
                document: document.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Cosine similarity between two vectors; 0.0 when either norm is zero or
/// the dimensions disagree
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
