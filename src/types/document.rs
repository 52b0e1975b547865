//! Indexable document type carrying citation metadata

use serde::{Deserialize, Serialize};

use super::section::LawRecord;

/// A law provision prepared for vector indexing.
///
/// Exactly one document is produced per law-depth section. Category headers
/// are never indexed as standalone documents; they only supply
/// `category_title` through the reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexableDocument {
    /// Text that gets embedded and retrieved
    pub text: String,
    /// Full dotted section number ("1.1")
    pub section_number: String,
    /// Law title
    pub title: String,
    /// Top-level segment of the section number
    pub category: String,
    /// Parent category title, `""` when the category was never declared
    pub category_title: String,
    /// Hierarchical path: "{category_title} > {section_number}"
    pub law_path: String,
    /// Label of the source file the law came from
    pub source_file: String,
    /// Citation tag attached to answers; the source file, with no page-level
    /// granularity since sections come from LLM extraction rather than
    /// page-based chunking
    pub citation_tag: String,
}

impl IndexableDocument {
    /// Build a document from a reconciled law record
    pub fn from_law(law: &LawRecord, source_file: &str) -> Self {
        Self {
            text: law.content.clone(),
            section_number: law.section_number.clone(),
            title: law.title.clone(),
            category: law.category.clone(),
            category_title: law.category_title.clone(),
            law_path: law.law_path.clone(),
            source_file: source_file.to_string(),
            citation_tag: source_file.to_string(),
        }
    }
}
