//! Per-page text extraction for source documents.
//!
//! The scanner supplies a [`ScannedFile`] with its [`SourceKind`]; this module returns the
//! raw text of each page. Failures are returned as [`ExtractError`] so the
//! processor can skip the file instead of aborting the batch.

use thiserror::Error;

use crate::models::{ScannedFile, SourceDocument, SourceKind};

/// Form feed, used as a page separator in plain-text exports.
const PAGE_BREAK: char = '\x0c';

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a scanned file and split its text into pages.
///
/// The size limit is checked against the size recorded at scan time.
pub fn extract_document(
    file: &ScannedFile,
    max_bytes: u64,
) -> Result<SourceDocument, ExtractError> {
    if file.size_bytes > max_bytes {
        return Err(ExtractError::TooLarge {
            size: file.size_bytes,
            limit: max_bytes,
        });
    }

    let bytes = std::fs::read(&file.path)?;
    let pages = extract_pages(&bytes, file.kind)?;

    Ok(SourceDocument {
        path: file.path.clone(),
        pages,
    })
}

/// Extract raw page texts from in-memory content.
pub fn extract_pages(bytes: &[u8], kind: SourceKind) -> Result<Vec<String>, ExtractError> {
    match kind {
        SourceKind::Pdf => extract_pdf_pages(bytes),
        SourceKind::PlainText => Ok(split_text_pages(&String::from_utf8_lossy(bytes))),
    }
}

fn extract_pdf_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn split_text_pages(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK).map(str::to_string).collect()
}
