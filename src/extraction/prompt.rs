//! Extraction prompt and input windowing

/// Version tag for the extraction prompt. Participates in the index
/// fingerprint so a prompt change invalidates cached indexes.
pub const PROMPT_VERSION: &str = "v2";

/// Build the structured-extraction prompt for one window of document text.
///
/// The prompt explicitly requests BOTH category headers (single-segment
/// numbers) and law provisions (multi-segment numbers): the category-vs-law
/// distinction drives citation quality downstream, and a reply containing
/// only laws would leave every `category_title` empty.
pub fn extraction_prompt(text: &str) -> String {
    format!(
        r#"You are a legal document parser. Extract all legal sections from the following text and format them as structured documents.

For each section, identify:
- Section number (e.g., 1, 1.1, 1.1.1)
- Section title/content
- Any subsections

Include BOTH top-level category headers (single-segment numbers like "1") AND law provisions (multi-segment numbers like "1.1" or "1.1.1").

Text to parse:
{text}

IMPORTANT: Return ONLY valid JSON. Do not include any explanatory text before or after the JSON.

Return a JSON array of objects with this exact structure:
[
  {{
    "section_number": "1",
    "title": "Peace",
    "content": "The law requires petty lords and landed knights to take their disputes to their liege lord..."
  }}
]"#
    )
}

/// Split text into consecutive character windows of at most `window_chars`.
///
/// Windows never split a character; empty input yields no windows. Each
/// window becomes one extraction call so the full document is covered
/// instead of only its first window.
pub fn windows(text: &str, window_chars: usize) -> Vec<String> {
    if text.is_empty() || window_chars == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(window_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
