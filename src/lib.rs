//! law-rag: question answering over a legal-text PDF with section-level citations
//!
//! The service extracts hierarchically numbered sections from a PDF using an LLM
//! extraction pass, links each law provision to its parent category, indexes the
//! provisions for semantic retrieval, and answers queries with a generated
//! response plus formatted citations back to the source sections.

pub mod config;
pub mod error;
pub mod extraction;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::QueryPipeline;
pub use types::{
    document::IndexableDocument,
    response::{Citation, QueryResult},
    section::{PageText, RawSection},
};
