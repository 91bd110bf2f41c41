//! Text extraction — turns uploaded PDF / DOCX bytes into plain text.
//!
//! Extraction never fails outward: a corrupt or unreadable document yields an
//! empty string and a `warn!`. The pipeline treats blank text as
//! `ParseError::ExtractionEmpty`.

use std::panic;
use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use tracing::{debug, warn};

use crate::resume::ParseError;

/// The two document formats the pipeline accepts, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Accepts `pdf` / `docx` in any case, with or without a leading dot.
    pub fn from_extension(extension: &str) -> Result<Self, ParseError> {
        let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ParseError::UnsupportedFormat(extension.to_string())),
        }
    }

    pub fn from_filename(filename: &str) -> Result<Self, ParseError> {
        match filename.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Err(ParseError::UnsupportedFormat(filename.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }
}

/// Extracts plain text from a document buffer. Returns `""` on any failure.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> String {
    if bytes.is_empty() {
        warn!("Empty {:?} document, nothing to extract", format);
        return String::new();
    }

    let text = match format {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => extract_docx(bytes),
    };

    debug!("Extracted {} chars from {:?} document", text.len(), format);
    text
}

fn extract_pdf(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed font/encoding tables.
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Error extracting text from PDF: {e}");
            String::new()
        }
        Err(_) => {
            warn!("PDF decoder panicked while extracting text");
            String::new()
        }
    }
}

/// One line per body paragraph; empty paragraphs stay as blank lines so the
/// section parsers can split entries on them.
fn extract_docx(bytes: &[u8]) -> String {
    let docx = match docx_rs::read_docx(bytes) {
        Ok(docx) => docx,
        Err(e) => {
            warn!("Error extracting text from DOCX: {e}");
            return String::new();
        }
    };

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
            _ => None,
        })
        .collect();

    paragraphs.join("\n")
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}
