//! Answer composition with the citation-formatting policy
//!
//! Turns ranked chunks into a generated answer plus formatted citations.
//! The citation policy is the auditable half of the pipeline: every chunk
//! keeps its section provenance, and an answer never ships with zero
//! citations while a response body exists.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::llm::LlmProvider;
use crate::providers::vector_store::ScoredChunk;
use crate::types::document::IndexableDocument;
use crate::types::response::{Citation, QueryResult};

use super::prompt;

/// Maximum citation excerpt length in characters before truncation
pub const MAX_EXCERPT_CHARS: usize = 200;

/// Answer composer issuing the generation call and formatting citations
pub struct AnswerComposer {
    llm: Arc<dyn LlmProvider>,
    top_k: usize,
}

impl AnswerComposer {
    /// Create a composer that keeps at most `top_k` citations per answer
    pub fn new(llm: Arc<dyn LlmProvider>, top_k: usize) -> Self {
        Self { llm, top_k }
    }

    /// Compose the final result from a query and its ranked chunks.
    ///
    /// The first `top_k` chunks become citations in rank order. The answer is
    /// generated even when retrieval returned nothing; in that case a single
    /// generic citation stands in so the result never reports zero citations.
    pub async fn compose(&self, query: &str, chunks: &[ScoredChunk]) -> Result<QueryResult> {
        let ranked = &chunks[..chunks.len().min(self.top_k)];

        let context = prompt::build_context(ranked);
        let answer = self
            .llm
            .complete(&prompt::answer_prompt(query, &context))
            .await?;

        Ok(QueryResult {
            query: query.to_string(),
            response: answer,
            citations: build_citations(ranked),
        })
    }
}

/// Build citations for ranked chunks, synthesizing the generic fallback when
/// the chunk list is empty
pub fn build_citations(chunks: &[ScoredChunk]) -> Vec<Citation> {
    if chunks.is_empty() {
        return vec![Citation {
            source: "Document".to_string(),
            text: "Information retrieved from document analysis.".to_string(),
        }];
    }

    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| Citation {
            source: citation_source(&chunk.document, i),
            text: truncate_excerpt(&chunk.document.text),
        })
        .collect()
}

/// Human-readable citation source for a retrieved document.
///
/// Precedence: section number with category title, section number alone,
/// then a 1-based positional fallback when the chunk carries no number.
pub fn citation_source(document: &IndexableDocument, position: usize) -> String {
    let number = &document.section_number;
    if number.is_empty() {
        return format!("Chunk {}", position + 1);
    }
    if document.category_title.is_empty() {
        format!("Law {} - {}", number, document.title)
    } else {
        format!(
            "Law {} ({}) - {}",
            number, document.category_title, document.title
        )
    }
}

/// Truncate excerpt text to `MAX_EXCERPT_CHARS` characters, appending an
/// ellipsis marker only when text was actually cut. Exactly 200 characters
/// pass through untouched; the comparison is strictly greater-than.
pub fn truncate_excerpt(text: &str) -> String {
    if text.chars().count() > MAX_EXCERPT_CHARS {
        let truncated: String = text.chars().take(MAX_EXCERPT_CHARS).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubLlm;

    #[async_trait]
    impl LlmProvider for StubLlm {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("Generated answer.".to_string())
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn document(number: &str, category_title: &str, title: &str, text: &str) -> IndexableDocument {
        IndexableDocument {
            text: text.to_string(),
            section_number: number.to_string(),
            title: title.to_string(),
            category: number.split('.').next().unwrap_or("").to_string(),
            category_title: category_title.to_string(),
            law_path: format!("{} > {}", category_title, number),
            source_file: "docs/laws.pdf".to_string(),
            citation_tag: "docs/laws.pdf".to_string(),
        }
    }

    fn chunk(number: &str, category_title: &str, text: &str) -> ScoredChunk {
        ScoredChunk {
            document: document(number, category_title, "Dispute Resolution", text),
            score: 0.8,
        }
    }

    #[test]
    fn source_prefers_number_with_category_title() {
        let doc = document("1.1", "Peace", "Dispute Resolution", "text");
        assert_eq!(
            citation_source(&doc, 0),
            "Law 1.1 (Peace) - Dispute Resolution"
        );
    }

    #[test]
    fn source_falls_back_to_number_without_category() {
        let doc = document("1.1", "", "Dispute Resolution", "text");
        assert_eq!(citation_source(&doc, 0), "Law 1.1 - Dispute Resolution");
    }

    #[test]
    fn source_falls_back_to_position_without_number() {
        let doc = document("", "", "Untitled", "text");
        assert_eq!(citation_source(&doc, 2), "Chunk 3");
    }

    #[test]
    fn excerpt_of_exactly_200_chars_is_not_truncated() {
        let text_200 = "a".repeat(200);
        let text_201 = "a".repeat(201);
        assert_eq!(truncate_excerpt(&text_200).chars().count(), 200);
        assert_eq!(truncate_excerpt(&text_201).chars().count(), 203);
        assert!(truncate_excerpt(&text_201).ends_with("..."));
        assert!(!truncate_excerpt(&text_200).ends_with("..."));
    }

    #[test]
    fn empty_chunks_synthesize_exactly_one_generic_citation() {
        let citations = build_citations(&[]);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].source, "Document");
        assert_eq!(
            citations[0].text,
            "Information retrieved from document analysis."
        );
    }

    #[tokio::test]
    async fn composer_caps_citations_at_top_k_in_rank_order() {
        let composer = AnswerComposer::new(Arc::new(StubLlm), 2);
        let chunks = vec![
            chunk("1.1", "Peace", "first"),
            chunk("1.2", "Peace", "second"),
            chunk("2.1", "Crown", "third"),
        ];
        let result = composer.compose("question?", &chunks).await.unwrap();
        assert_eq!(result.citations.len(), 2);
        assert_eq!(result.citations[0].source, "Law 1.1 (Peace) - Dispute Resolution");
        assert_eq!(result.citations[1].source, "Law 1.2 (Peace) - Dispute Resolution");
        assert_eq!(result.response, "Generated answer.");
    }

    #[tokio::test]
    async fn composer_answers_with_generic_citation_when_retrieval_is_empty() {
        let composer = AnswerComposer::new(Arc::new(StubLlm), 2);
        let result = composer.compose("question?", &[]).await.unwrap();
        assert_eq!(result.citations.len(), 1);
        assert_eq!(result.citations[0].source, "Document");
        assert!(!result.response.is_empty());
    }

    #[tokio::test]
    async fn composing_twice_yields_identical_results() {
        let composer = AnswerComposer::new(Arc::new(StubLlm), 2);
        let chunks = vec![chunk("1.1", "Peace", "first")];
        let a = composer.compose("question?", &chunks).await.unwrap();
        let b = composer.compose("question?", &chunks).await.unwrap();
        assert_eq!(a, b);
    }
}
