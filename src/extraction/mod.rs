//! LLM-based section extraction
//!
//! Sends flattened document text to the extraction model and parses its JSON
//! reply into typed section records. The reply must be a fully-typed JSON
//! array; no partial recovery is attempted since every later stage assumes
//! typed sections.

pub mod prompt;
pub mod reconcile;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::llm::LlmProvider;
use crate::types::section::{RawSection, UNKNOWN_SECTION};

pub use prompt::PROMPT_VERSION;
pub use reconcile::reconcile;

/// Section extraction service backed by an LLM provider
pub struct SectionExtractor {
    llm: Arc<dyn LlmProvider>,
    window_chars: usize,
}

impl SectionExtractor {
    /// Create an extractor issuing one model call per text window
    pub fn new(llm: Arc<dyn LlmProvider>, window_chars: usize) -> Self {
        Self { llm, window_chars }
    }

    /// Extract sections from the full flattened document text.
    ///
    /// The text is split into consecutive windows and one extraction call is
    /// issued per window; results are merged in window order. Section order
    /// within a window is whatever the model returned, so callers must not
    /// assume sections arrive sorted by number.
    pub async fn extract(&self, text: &str) -> Result<Vec<RawSection>> {
        let mut sections = Vec::new();

        for (i, window) in prompt::windows(text, self.window_chars).iter().enumerate() {
            let reply = self.llm.complete(&prompt::extraction_prompt(window)).await?;
            let parsed = parse_sections(&reply)?;
            tracing::debug!(window = i, sections = parsed.len(), "extraction window parsed");
            sections.extend(parsed);
        }

        tracing::info!(sections = sections.len(), "section extraction complete");
        Ok(sections)
    }
}

/// Parse the extraction model's reply into section records.
///
/// The reply must be a JSON array. Array entries that are not objects or are
/// missing a non-empty `content` field are silently dropped. A missing
/// `section_number` becomes the `"unknown"` sentinel; a missing `title`
/// defaults to the first 100 characters of the content.
pub fn parse_sections(reply: &str) -> Result<Vec<RawSection>> {
    let value: serde_json::Value = serde_json::from_str(reply)
        .map_err(|_| Error::ExtractionFormat("Invalid JSON response".into()))?;

    let entries = value
        .as_array()
        .ok_or_else(|| Error::ExtractionFormat("Invalid JSON response".into()))?;

    let sections = entries
        .iter()
        .filter_map(|entry| {
            let object = entry.as_object()?;
            let content = object.get("content")?.as_str()?;
            if content.is_empty() {
                return None;
            }

            let section_number = object
                .get("section_number")
                .and_then(|v| v.as_str())
                .unwrap_or(UNKNOWN_SECTION)
                .to_string();
            let title = object
                .get("title")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| content.chars().take(100).collect());

            Some(RawSection {
                section_number,
                title,
                content: content.to_string(),
            })
        })
        .collect();

    Ok(sections)
}
