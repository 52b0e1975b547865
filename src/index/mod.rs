//! Index construction: reconciled laws to an embedded, searchable corpus

pub mod cache;

use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::error::Result;
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::memory::InMemoryVectorStore;
use crate::providers::vector_store::VectorStoreProvider;
use crate::types::document::IndexableDocument;
use crate::types::section::LawRecord;

pub use cache::IndexCache;

/// A fully built retrieval corpus: the indexable documents plus the vector
/// store holding their embeddings
pub struct BuiltIndex {
    /// Documents in build order
    pub documents: Vec<IndexableDocument>,
    /// Vector store with one entry per document
    pub store: Arc<dyn VectorStoreProvider>,
}

impl std::fmt::Debug for BuiltIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltIndex")
            .field("documents", &self.documents)
            .finish_non_exhaustive()
    }
}

impl BuiltIndex {
    /// True when the corpus has no documents to search
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Convert reconciled law records into indexable documents.
///
/// Pure and deterministic; empty input returns an empty vec. Categories never
/// reach this stage, so every record becomes exactly one document.
pub fn build_documents(laws: &[LawRecord], source_file: &str) -> Vec<IndexableDocument> {
    laws.iter()
        .map(|law| IndexableDocument::from_law(law, source_file))
        .collect()
}

/// Embed the documents and load them into a fresh in-memory store
pub async fn build_index(
    documents: Vec<IndexableDocument>,
    embedder: &dyn EmbeddingProvider,
) -> Result<BuiltIndex> {
    let texts: Vec<String> = documents.iter().map(|doc| doc.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    let store = InMemoryVectorStore::new();
    for (document, embedding) in documents.iter().cloned().zip(embeddings) {
        store.insert(document, embedding).await?;
    }

    tracing::info!(documents = documents.len(), "retrieval index built");
    Ok(BuiltIndex {
        documents,
        store: Arc::new(store),
    })
}

/// Content-addressed fingerprint of a source document under the current
/// extraction prompt: sha256 over the PDF bytes and the prompt version.
/// A changed document or a changed prompt yields a different fingerprint.
pub fn fingerprint(pdf_bytes: &[u8], prompt_version: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pdf_bytes);
    hasher.update(prompt_version.as_bytes());
    hex::encode(hasher.finalize())
}
