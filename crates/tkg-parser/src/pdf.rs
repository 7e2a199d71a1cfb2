//! PDF document parser using pdf-extract
//!
//! Extracts the text of every page; page breaks arrive as form feed
//! characters and are treated as line breaks by `ParsedDocument::lines`.

use std::path::Path;

use crate::{DocumentParser, FileType, ParsedDocument, ParserError, Result};

/// PDF document parser
#[derive(Debug, Clone, Default)]
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser
    pub fn new() -> Self {
        Self
    }

    /// Extract text from a PDF file
    fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| ParserError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| ParserError::PdfError(format!("{}: {e}", path.display())))
    }
}

/// Estimate page count from form feed characters
fn estimate_page_count(text: &str) -> Option<u32> {
    match text.matches('\x0C').count() as u32 {
        0 => None,
        breaks => Some(breaks + 1),
    }
}

impl DocumentParser for PdfParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let text = self.extract_text(path)?;
        let page_count = estimate_page_count(&text);

        let mut doc = ParsedDocument::new(path.display().to_string(), FileType::Pdf)
            .with_content(text);
        doc.page_count = page_count;

        Ok(doc)
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Pdf]
    }
}
