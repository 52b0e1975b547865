//! Provider abstractions for embeddings, LLM calls, and vector storage
//!
//! The pipeline consumes these trait seams so remote services stay
//! black boxes: OpenAI-backed implementations are used in production and
//! stub implementations in tests.

pub mod embedding;
pub mod llm;
pub mod memory;
pub mod openai;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use memory::InMemoryVectorStore;
pub use openai::OpenAiProvider;
pub use vector_store::{ScoredChunk, VectorStoreProvider};
