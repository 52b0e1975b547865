//! Source document ingestion

pub mod pdf;

pub use pdf::{extract_pages, flatten_pages};
