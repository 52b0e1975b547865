//! Section types produced by PDF extraction and LLM-based section parsing

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel section number for entries whose number was missing or malformed.
/// Such entries are never indexed and never recorded as categories.
pub const UNKNOWN_SECTION: &str = "unknown";

/// Plain text of a single PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number
    pub page_number: u32,
    /// Lines with trailing whitespace stripped; blank lines are kept
    pub lines: Vec<String>,
}

impl PageText {
    /// Join the page's lines with single spaces
    pub fn flattened(&self) -> String {
        self.lines.join(" ")
    }
}

/// A section record parsed from the extraction model's JSON reply.
///
/// The dot-depth of `section_number` determines its role: a single segment
/// ("1") is a category header, two or more segments ("1.1", "1.1.1") are law
/// provisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSection {
    /// Dotted numeric string, or `UNKNOWN_SECTION` when missing
    pub section_number: String,
    /// Section title
    pub title: String,
    /// Section body text, always non-empty
    pub content: String,
}

impl RawSection {
    /// Number of dot-separated segments in the section number.
    /// `"1"` has one segment, `"1.1"` two, `""` zero.
    pub fn depth(&self) -> usize {
        self.section_number
            .split('.')
            .filter(|segment| !segment.is_empty())
            .count()
    }

    /// True for single-segment numbers other than the unknown sentinel
    pub fn is_category(&self) -> bool {
        self.section_number != UNKNOWN_SECTION && self.depth() == 1
    }

    /// True for numbers with two or more segments
    pub fn is_law(&self) -> bool {
        self.section_number != UNKNOWN_SECTION && self.depth() >= 2
    }

    /// Top-level segment of the section number ("1.2.3" -> "1")
    pub fn top_level(&self) -> &str {
        self.section_number
            .split('.')
            .next()
            .unwrap_or(&self.section_number)
    }
}

/// Mapping from top-level section number to category title.
///
/// Built in a single pass over all category-depth sections and read-only
/// afterwards; only used to annotate laws with their parent category title.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    titles: HashMap<String, String>,
}

impl CategoryIndex {
    /// Build the index from category-depth sections. If the same top-level
    /// number appears twice, the last entry wins.
    pub fn from_sections(sections: &[RawSection]) -> Self {
        let mut titles = HashMap::new();
        for section in sections.iter().filter(|s| s.is_category()) {
            titles.insert(section.section_number.clone(), section.title.clone());
        }
        Self { titles }
    }

    /// Title of a category, or `""` when the category was never declared
    pub fn title_for(&self, number: &str) -> &str {
        self.titles.get(number).map(String::as_str).unwrap_or("")
    }

    /// Number of categories recorded
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True when no categories were recorded
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// A law provision linked to its parent category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawRecord {
    /// Full dotted section number ("1.1", "2.3.1")
    pub section_number: String,
    /// Law title
    pub title: String,
    /// Law body text
    pub content: String,
    /// Top-level segment of the section number
    pub category: String,
    /// Parent category title, `""` when the category was never declared
    pub category_title: String,
    /// Hierarchical path: "{category_title} > {section_number}"
    pub law_path: String,
}
