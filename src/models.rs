//! Core data models used throughout docchunk.
//!
//! These types represent the files, pages, and chunks that flow through the
//! scan → extract → chunk → tag pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Document formats the extractor understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    PlainText,
}

impl SourceKind {
    /// Classify a file by its extension (case-insensitive).
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" | "md" => Some(SourceKind::PlainText),
            _ => None,
        }
    }
}

/// A file found by the scanner, before any content is read.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Absolute (or root-joined) path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root, used for ordering and display.
    pub relative_path: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
    pub kind: SourceKind,
}

/// Extracted text of a single file, one entry per page.
///
/// Pages are stored in order; page numbers are 1-based positions in `pages`.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub pages: Vec<String>,
}

impl SourceDocument {
    /// File name of `path`, recorded as each chunk's `source`.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Iterate `(page_number, text)` pairs with 1-based page numbers.
    pub fn numbered_pages(&self) -> impl Iterator<Item = (u32, &str)> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, text)| (i as u32 + 1, text.as_str()))
    }
}

/// Coarse topic label assigned to a chunk by the keyword tagger.
///
/// Declaration order is significant: it breaks ties between categories
/// with the same number of keyword hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Product,
    Billing,
    Technical,
    Account,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Product,
        Category::Billing,
        Category::Technical,
        Category::Account,
        Category::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Product => "PRODUCT",
            Category::Billing => "BILLING",
            Category::Technical => "TECHNICAL",
            Category::Account => "ACCOUNT",
            Category::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bounded span of page text with provenance, the unit handed to the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentChunk {
    pub chunk_id: u64,
    pub text: String,
    /// Origin file name.
    pub source: String,
    /// 1-based page number within the source.
    pub page: u32,
    pub category: Category,
    /// SHA-256 of `text`, hex-encoded.
    pub hash: String,
}
