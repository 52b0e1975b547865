//! Query orchestrator
//!
//! Wires the full document-to-citation pipeline per query: read PDF, extract
//! sections, reconcile categories, build and cache the retrieval index, then
//! retrieve and compose the cited answer. Every stage returns a typed error;
//! the orchestrator is the single collapse boundary where any failure folds
//! into a degraded but well-formed `QueryResult`.

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::extraction::{self, SectionExtractor, PROMPT_VERSION};
use crate::generation::AnswerComposer;
use crate::index::{self, BuiltIndex, IndexCache};
use crate::ingestion::pdf;
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::llm::LlmProvider;
use crate::providers::openai::OpenAiProvider;
use crate::types::response::QueryResult;

/// The per-query pipeline with its providers and index cache
pub struct QueryPipeline {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    extraction_llm: Arc<dyn LlmProvider>,
    generation_llm: Arc<dyn LlmProvider>,
    cache: IndexCache,
}

impl QueryPipeline {
    /// Create a pipeline backed by OpenAI providers.
    ///
    /// Fails with `Error::Config` when the API credential is absent; this
    /// happens at construction, before any query is accepted.
    pub fn new(config: RagConfig) -> Result<Self> {
        let provider = OpenAiProvider::new(&config.openai)?;
        let embedder = provider.embedder();
        let extraction_llm = provider.extraction_llm();
        let generation_llm = provider.generation_llm();
        Ok(Self::with_providers(
            config,
            embedder,
            extraction_llm,
            generation_llm,
        ))
    }

    /// Create a pipeline with explicit providers (used by tests)
    pub fn with_providers(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        extraction_llm: Arc<dyn LlmProvider>,
        generation_llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            config,
            embedder,
            extraction_llm,
            generation_llm,
            cache: IndexCache::new(),
        }
    }

    /// Answer a query. Never fails: internal errors become a degraded result
    /// with the failure message in the response body and no citations.
    pub async fn execute(&self, query: &str) -> QueryResult {
        match self.run(query).await {
            Ok(result) => result,
            Err(err) => self.degrade(query, err),
        }
    }

    async fn run(&self, query: &str) -> Result<QueryResult> {
        let bytes = pdf::read_bytes(&self.config.document.path)?;
        let fingerprint = index::fingerprint(&bytes, PROMPT_VERSION);

        let built = self
            .cache
            .get_or_build(&fingerprint, || self.build_corpus(&bytes))
            .await?;

        self.answer(query, &built).await
    }

    /// Build the retrieval corpus for one source document: extract pages,
    /// run windowed section extraction, reconcile categories, embed laws
    async fn build_corpus(&self, bytes: &[u8]) -> Result<BuiltIndex> {
        let pages = pdf::extract_pages(bytes)?;
        let text = pdf::flatten_pages(&pages);
        tracing::info!(pages = pages.len(), chars = text.chars().count(), "document extracted");

        let extractor = SectionExtractor::new(
            Arc::clone(&self.extraction_llm),
            self.config.extraction.window_chars,
        );
        let sections = extractor.extract(&text).await?;
        let laws = extraction::reconcile(&sections);
        let documents = index::build_documents(&laws, &self.config.document.source_file);

        index::build_index(documents, self.embedder.as_ref()).await
    }

    /// Retrieve and compose for a built corpus
    async fn answer(&self, query: &str, built: &BuiltIndex) -> Result<QueryResult> {
        if built.is_empty() {
            tracing::warn!("no indexable documents; skipping retrieval");
            return Ok(QueryResult::no_documents(query));
        }

        let top_k = self.config.retrieval.top_k;
        let query_embedding = self.embedder.embed(query).await?;
        let chunks = built.store.search(&query_embedding, top_k).await?;

        let composer = AnswerComposer::new(Arc::clone(&self.generation_llm), top_k);
        composer.compose(query, &chunks).await
    }

    /// Fold a pipeline failure into the degraded result shape. The match is
    /// exhaustive so a new error variant cannot silently skip logging.
    fn degrade(&self, query: &str, err: Error) -> QueryResult {
        match &err {
            Error::Config(msg) => tracing::error!(error = %msg, "configuration failure in pipeline"),
            Error::DocumentRead(msg) => tracing::warn!(error = %msg, "source document unreadable"),
            Error::ExtractionFormat(msg) => tracing::warn!(error = %msg, "extraction reply unparseable"),
            Error::Embedding(msg) => tracing::warn!(error = %msg, "embedding provider failure"),
            Error::Llm(msg) => tracing::warn!(error = %msg, "llm provider failure"),
            Error::Retrieval(msg) => tracing::warn!(error = %msg, "vector store failure"),
        }
        QueryResult::degraded(query, &err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    /// LLM stub answering the extraction prompt with canned JSON and every
    /// other prompt with a fixed answer
    struct StubLlm {
        extraction_reply: String,
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        async fn complete(&self, prompt: &str) -> Result<String> {
            if prompt.contains("Return ONLY valid JSON") {
                Ok(self.extraction_reply.clone())
            } else {
                Ok("The law requires disputes to go to the liege lord.".to_string())
            }
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    /// Deterministic embedder: maps text to a fixed-dimension vector derived
    /// from byte sums, so identical inputs embed identically
    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let sum: u32 = text.bytes().map(u32::from).sum();
            Ok(vec![(sum % 97) as f32, (text.len() % 13) as f32, 1.0])
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn pipeline_with(extraction_reply: &str) -> QueryPipeline {
        QueryPipeline::with_providers(
            RagConfig::default(),
            Arc::new(StubEmbedder),
            Arc::new(StubLlm {
                extraction_reply: extraction_reply.to_string(),
            }),
            Arc::new(StubLlm {
                extraction_reply: extraction_reply.to_string(),
            }),
        )
    }

    async fn corpus_for(pipeline: &QueryPipeline, sections_json: &str) -> BuiltIndex {
        let sections = crate::extraction::parse_sections(sections_json).unwrap();
        let laws = extraction::reconcile(&sections);
        let documents = index::build_documents(&laws, "docs/laws.pdf");
        index::build_index(documents, pipeline.embedder.as_ref())
            .await
            .unwrap()
    }

    const PEACE_LAWS: &str = r#"[
        {"section_number": "1", "title": "Peace", "content": "Category header."},
        {"section_number": "1.1", "title": "Dispute Resolution", "content": "The law requires petty lords to take disputes to their liege lord."},
        {"section_number": "1.2", "title": "Kingsroad", "content": "The law protects travellers on the kingsroad."}
    ]"#;

    #[tokio::test]
    async fn empty_corpus_short_circuits_without_retrieval() {
        let pipeline = pipeline_with("[]");
        let built = corpus_for(&pipeline, "[]").await;
        let result = pipeline.answer("what about theft?", &built).await.unwrap();
        assert_eq!(result.response, "No documents found to search through.");
        assert!(result.citations.is_empty());
    }

    #[tokio::test]
    async fn answer_carries_citations_with_law_provenance() {
        let pipeline = pipeline_with(PEACE_LAWS);
        let built = corpus_for(&pipeline, PEACE_LAWS).await;
        let result = pipeline.answer("who settles disputes?", &built).await.unwrap();

        assert_eq!(result.query, "who settles disputes?");
        assert!(!result.response.is_empty());
        assert_eq!(result.citations.len(), 2);
        assert!(result.citations[0].source.starts_with("Law 1."));
        assert!(result.citations[0].source.contains("(Peace)"));
    }

    #[tokio::test]
    async fn identical_queries_yield_identical_results() {
        let pipeline = pipeline_with(PEACE_LAWS);
        let built = corpus_for(&pipeline, PEACE_LAWS).await;
        let a = pipeline.answer("who settles disputes?", &built).await.unwrap();
        let b = pipeline.answer("who settles disputes?", &built).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn missing_pdf_degrades_with_document_read_message() {
        let mut config = RagConfig::default();
        config.document.path = PathBuf::from("/nonexistent/laws.pdf");
        let pipeline = QueryPipeline::with_providers(
            config,
            Arc::new(StubEmbedder),
            Arc::new(StubLlm {
                extraction_reply: "[]".to_string(),
            }),
            Arc::new(StubLlm {
                extraction_reply: "[]".to_string(),
            }),
        );

        let result = pipeline.execute("any question").await;
        assert!(result
            .response
            .starts_with("Error processing query: Document read failed:"));
        assert!(result.citations.is_empty());
    }

    #[tokio::test]
    async fn malformed_extraction_reply_degrades_with_root_cause() {
        let pipeline = pipeline_with("The sections are as follows: ...");
        // Drive the extraction stage directly; the degraded shape is what the
        // endpoint would return for this failure
        let extractor = SectionExtractor::new(Arc::clone(&pipeline.extraction_llm), 4000);
        let err = extractor.extract("some document text").await.unwrap_err();
        let result = pipeline.degrade("any question", err);

        assert_eq!(
            result.response,
            "Error processing query: LLM extraction failed: Invalid JSON response"
        );
        assert!(result.citations.is_empty());
    }
}
