//! PDF text extraction
//!
//! Produces ordered per-page plain text. Lines keep their position: trailing
//! whitespace is stripped per line but blank lines are never filtered, so the
//! extraction output stays faithful to the page layout.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::section::PageText;

/// Extract per-page text from PDF bytes.
///
/// Pages are 1-based and ordered. A page that yields no text becomes a
/// `PageText` with no lines rather than being dropped.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<PageText>> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| Error::DocumentRead(format!("Invalid PDF: {}", e)))?;

    Ok(pages
        .iter()
        .enumerate()
        .map(|(i, raw)| PageText {
            page_number: (i + 1) as u32,
            lines: raw.lines().map(|line| line.trim_end().to_string()).collect(),
        })
        .collect())
}

/// Read a PDF from disk and extract per-page text
pub fn extract_pages_from_path(path: &Path) -> Result<Vec<PageText>> {
    let bytes = read_bytes(path)?;
    extract_pages(&bytes)
}

/// Read the raw bytes of the source PDF
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| Error::DocumentRead(format!("Cannot read {}: {}", path.display(), e)))
}

/// Flatten extracted pages into a single string, pages separated by a space
pub fn flatten_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|page| page.flattened())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_document_read_error() {
        let err = extract_pages_from_path(Path::new("/nonexistent/laws.pdf")).unwrap_err();
        assert!(matches!(err, Error::DocumentRead(_)));
    }

    #[test]
    fn invalid_container_is_document_read_error() {
        let err = extract_pages(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, Error::DocumentRead(_)));
    }

    #[test]
    fn flatten_joins_pages_with_spaces() {
        let pages = vec![
            PageText {
                page_number: 1,
                lines: vec!["1 Peace".into(), "1.1 Disputes".into()],
            },
            PageText {
                page_number: 2,
                lines: vec!["2 Crown".into()],
            },
        ];
        assert_eq!(flatten_pages(&pages), "1 Peace 1.1 Disputes 2 Crown");
    }

    #[test]
    fn blank_lines_survive_flattening() {
        let page = PageText {
            page_number: 1,
            lines: vec!["a".into(), "".into(), "b".into()],
        };
        assert_eq!(page.flattened(), "a  b");
    }
}
