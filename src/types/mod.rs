//! Core types for the law-rag pipeline

pub mod document;
pub mod response;
pub mod section;

pub use document::IndexableDocument;
pub use response::{Citation, QueryResult};
pub use section::{CategoryIndex, LawRecord, PageText, RawSection};
