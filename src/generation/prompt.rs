//! Prompt templates for answer generation

use crate::providers::vector_store::ScoredChunk;

/// Build the retrieval context block from ranked chunks.
///
/// Each chunk is numbered and labeled with its law path so the model can
/// ground claims in a specific provision.
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    let mut context = String::new();

    for (i, chunk) in chunks.iter().enumerate() {
        let doc = &chunk.document;
        let source_ref = if doc.law_path.is_empty() {
            doc.citation_tag.clone()
        } else {
            format!("{} ({})", doc.law_path, doc.citation_tag)
        };

        context.push_str(&format!(
            "[{}] {}\n\nContent:\n{}\n\n---\n\n",
            i + 1,
            source_ref,
            doc.text
        ));
    }

    context
}

/// Build the grounded answer prompt
pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        r#"You are a legal assistant answering questions about a body of laws. Use ONLY the provided law excerpts to answer.

RULES:
1. Base every claim on the excerpts below; do not use outside knowledge
2. If the excerpts do not contain the answer, say so plainly
3. Refer to laws by their section number when possible
4. Answer in clear language a layperson can follow

LAW EXCERPTS:
{context}

QUESTION: {question}

ANSWER:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::IndexableDocument;

    fn chunk(number: &str, law_path: &str, text: &str) -> ScoredChunk {
        ScoredChunk {
            document: IndexableDocument {
                text: text.to_string(),
                section_number: number.to_string(),
                title: "T".to_string(),
                category: "1".to_string(),
                category_title: "Peace".to_string(),
                law_path: law_path.to_string(),
                source_file: "docs/laws.pdf".to_string(),
                citation_tag: "docs/laws.pdf".to_string(),
            },
            score: 0.9,
        }
    }

    #[test]
    fn context_numbers_chunks_and_names_law_paths() {
        let chunks = vec![
            chunk("1.1", "Peace > 1.1", "First law."),
            chunk("1.2", "Peace > 1.2", "Second law."),
        ];
        let context = build_context(&chunks);
        assert!(context.contains("[1] Peace > 1.1 (docs/laws.pdf)"));
        assert!(context.contains("[2] Peace > 1.2 (docs/laws.pdf)"));
        assert!(context.contains("First law."));
    }

    #[test]
    fn answer_prompt_embeds_question_and_context() {
        let prompt = answer_prompt("What about theft?", "[1] some context");
        assert!(prompt.contains("QUESTION: What about theft?"));
        assert!(prompt.contains("[1] some context"));
    }
}
