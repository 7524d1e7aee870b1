//! Document processing pipeline.
//!
//! Coordinates the batch flow: scan → extract → normalize → chunk → tag.
//! The [`DocumentProcessor`] owns the chunk id counter, so ids stay unique
//! and strictly increasing across every file it processes.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::chunk::{chunk_spans, content_hash, normalize_whitespace};
use crate::config::{Config, ErrorPolicy};
use crate::extract::{extract_document, ExtractError};
use crate::models::{DocumentChunk, SourceDocument};
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::scanner::{scan_directory, ScanError};
use crate::tagger::{tag_text, CategoryRules};

/// Why a directory produced no documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    MissingDirectory,
    NoEligibleFiles,
}

impl EmptyReason {
    /// Classify an empty scan of `root`.
    pub fn for_root(root: &Path) -> Self {
        if root.is_dir() {
            EmptyReason::NoEligibleFiles
        } else {
            EmptyReason::MissingDirectory
        }
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::MissingDirectory => f.write_str("directory does not exist"),
            EmptyReason::NoEligibleFiles => f.write_str("no eligible files"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("no documents found in {}: {reason}", .root.display())]
    NoDocuments { root: PathBuf, reason: EmptyReason },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("failed to process {file}: {source}")]
    Extract {
        file: String,
        #[source]
        source: ExtractError,
    },
}

/// A file that was skipped because it could not be read or extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// Outcome of one [`DocumentProcessor::process_directory`] call.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub root: PathBuf,
    pub chunks: Vec<DocumentChunk>,
    pub files_found: usize,
    pub files_processed: usize,
    pub failures: Vec<FileFailure>,
    /// The id the processor will hand to its next chunk.
    pub next_chunk_id: u64,
}

pub struct DocumentProcessor {
    config: Config,
    rules: CategoryRules,
    next_chunk_id: u64,
}

impl DocumentProcessor {
    pub fn new(config: Config) -> Self {
        let rules = CategoryRules::from_config(&config.categories);
        Self {
            config,
            rules,
            next_chunk_id: 0,
        }
    }

    pub fn next_chunk_id(&self) -> u64 {
        self.next_chunk_id
    }

    /// Process the configured `source.root`.
    pub fn process_all_documents(
        &mut self,
        progress: &dyn ProgressReporter,
    ) -> Result<ProcessReport, ProcessError> {
        let root = self.config.source.root.clone();
        self.process_directory(&root, progress)
    }

    /// Scan `root` and chunk every eligible file in scan order.
    pub fn process_directory(
        &mut self,
        root: &Path,
        progress: &dyn ProgressReporter,
    ) -> Result<ProcessReport, ProcessError> {
        progress.report(ProgressEvent::Scanning {
            root: root.display().to_string(),
        });

        let files = scan_directory(root, &self.config.source)?;
        if files.is_empty() {
            return Err(ProcessError::NoDocuments {
                root: root.to_path_buf(),
                reason: EmptyReason::for_root(root),
            });
        }

        let total = files.len() as u64;
        let mut report = ProcessReport {
            root: root.to_path_buf(),
            chunks: Vec::new(),
            files_found: files.len(),
            files_processed: 0,
            failures: Vec::new(),
            next_chunk_id: self.next_chunk_id,
        };

        for (i, file) in files.iter().enumerate() {
            progress.report(ProgressEvent::Processing {
                file: file.relative_path.clone(),
                n: i as u64 + 1,
                total,
            });

            let doc = match extract_document(file, self.config.source.max_file_bytes) {
                Ok(doc) => doc,
                Err(source) => {
                    if self.config.processing.on_extract_error == ErrorPolicy::Fail {
                        return Err(ProcessError::Extract {
                            file: file.relative_path.clone(),
                            source,
                        });
                    }
                    tracing::warn!(file = %file.relative_path, error = %source, "skipping file");
                    progress.report(ProgressEvent::FileFailed {
                        file: file.relative_path.clone(),
                        error: source.to_string(),
                    });
                    report.failures.push(FileFailure {
                        file: file.relative_path.clone(),
                        error: source.to_string(),
                    });
                    continue;
                }
            };

            let chunks = self.process_document(&doc);
            if chunks.is_empty() {
                tracing::warn!(file = %file.relative_path, "no extractable text");
            }
            tracing::info!(
                file = %file.relative_path,
                pages = doc.pages.len(),
                chunks = chunks.len(),
                "processed"
            );
            progress.report(ProgressEvent::FileDone {
                file: file.relative_path.clone(),
                chunks: chunks.len() as u64,
            });
            report.chunks.extend(chunks);
            report.files_processed += 1;
        }

        report.next_chunk_id = self.next_chunk_id;
        Ok(report)
    }

    /// Chunk and tag every page of an extracted document.
    pub fn process_document(&mut self, doc: &SourceDocument) -> Vec<DocumentChunk> {
        let source = doc.name();
        let mut chunks = Vec::new();
        for (page, raw) in doc.numbered_pages() {
            let text = normalize_whitespace(raw);
            for span in chunk_spans(&text, self.config.chunking) {
                chunks.push(DocumentChunk {
                    chunk_id: self.next_chunk_id,
                    text: span.to_string(),
                    source: source.clone(),
                    page,
                    category: tag_text(span, &self.rules),
                    hash: content_hash(span),
                });
                self.next_chunk_id += 1;
            }
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkingConfig;
    use crate::models::Category;
    use crate::progress::NoProgress;
    use std::fs;
    use tempfile::TempDir;

    fn text_config(max_chars: usize, overlap_chars: usize) -> Config {
        let mut config = Config::minimal();
        config.source.include_globs = vec!["**/*.txt".to_string(), "**/*.pdf".to_string()];
        config.chunking = ChunkingConfig {
            max_chars,
            overlap_chars,
        };
        config
    }

    fn write_corpus(dir: &Path) {
        fs::write(
            dir.join("billing.txt"),
            "Your subscription renews monthly. Refunds are issued to the original payment method within ten days of the request.",
        )
        .unwrap();
        fs::write(
            dir.join("setup.txt"),
            "Install the desktop app.\x0cIf the microphone is not working, grant the permission in system settings and restart.",
        )
        .unwrap();
    }

    #[test]
    fn ids_are_unique_and_increasing_across_files() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());
        let mut processor = DocumentProcessor::new(text_config(40, 8));
        let report = processor.process_directory(tmp.path(), &NoProgress).unwrap();

        assert_eq!(report.files_found, 2);
        assert_eq!(report.files_processed, 2);
        assert!(report.chunks.len() > 2);
        for (i, chunk) in report.chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_id, i as u64);
        }
        assert_eq!(report.next_chunk_id, report.chunks.len() as u64);
    }

    #[test]
    fn counter_continues_across_runs_of_one_processor() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());
        let mut processor = DocumentProcessor::new(text_config(40, 8));
        let first = processor.process_directory(tmp.path(), &NoProgress).unwrap();
        let second = processor.process_directory(tmp.path(), &NoProgress).unwrap();
        assert_eq!(second.chunks[0].chunk_id, first.next_chunk_id);
    }

    #[test]
    fn provenance_and_categories() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());
        let mut processor = DocumentProcessor::new(text_config(1000, 100));
        let report = processor.process_directory(tmp.path(), &NoProgress).unwrap();

        assert_eq!(report.chunks.len(), 3);
        let billing = &report.chunks[0];
        assert_eq!(billing.source, "billing.txt");
        assert_eq!(billing.page, 1);
        assert_eq!(billing.category, Category::Billing);
        assert_eq!(billing.hash, content_hash(&billing.text));

        let setup_pages: Vec<u32> = report.chunks[1..].iter().map(|c| c.page).collect();
        assert_eq!(setup_pages, vec![1, 2]);
        assert_eq!(report.chunks[2].category, Category::Technical);
    }

    #[test]
    fn same_input_gives_same_chunks() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());
        let a = DocumentProcessor::new(text_config(50, 10))
            .process_directory(tmp.path(), &NoProgress)
            .unwrap();
        let b = DocumentProcessor::new(text_config(50, 10))
            .process_directory(tmp.path(), &NoProgress)
            .unwrap();
        assert_eq!(a.chunks, b.chunks);
    }

    #[test]
    fn single_500_char_page() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("long.txt"), "w".repeat(500)).unwrap();
        let report = DocumentProcessor::new(text_config(200, 20))
            .process_directory(tmp.path(), &NoProgress)
            .unwrap();
        let sizes: Vec<usize> = report.chunks.iter().map(|c| c.text.chars().count()).collect();
        assert_eq!(sizes, vec![200, 200, 140]);
    }

    #[test]
    fn empty_directory_is_no_documents() {
        let tmp = TempDir::new().unwrap();
        let err = DocumentProcessor::new(text_config(200, 20))
            .process_directory(tmp.path(), &NoProgress)
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::NoDocuments {
                reason: EmptyReason::NoEligibleFiles,
                ..
            }
        ));
        assert!(err.to_string().contains("no documents found"));
    }

    #[test]
    fn missing_directory_is_no_documents() {
        let tmp = TempDir::new().unwrap();
        let err = DocumentProcessor::new(text_config(200, 20))
            .process_directory(&tmp.path().join("absent"), &NoProgress)
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::NoDocuments {
                reason: EmptyReason::MissingDirectory,
                ..
            }
        ));
    }

    #[test]
    fn empty_reason_for_root() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(EmptyReason::for_root(tmp.path()), EmptyReason::NoEligibleFiles);
        assert_eq!(
            EmptyReason::for_root(&tmp.path().join("absent")),
            EmptyReason::MissingDirectory
        );
    }

    #[test]
    fn bad_file_is_skipped_by_default() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());
        fs::write(tmp.path().join("corrupt.pdf"), b"not a pdf").unwrap();
        let report = DocumentProcessor::new(text_config(1000, 100))
            .process_directory(tmp.path(), &NoProgress)
            .unwrap();
        assert_eq!(report.files_found, 3);
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "corrupt.pdf");
        assert_eq!(report.chunks.len(), 3);
    }

    #[test]
    fn bad_file_fails_batch_under_fail_policy() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());
        fs::write(tmp.path().join("corrupt.pdf"), b"not a pdf").unwrap();
        let mut config = text_config(1000, 100);
        config.processing.on_extract_error = ErrorPolicy::Fail;
        let err = DocumentProcessor::new(config)
            .process_directory(tmp.path(), &NoProgress)
            .unwrap_err();
        assert!(matches!(err, ProcessError::Extract { ref file, .. } if file == "corrupt.pdf"));
    }

    #[test]
    fn process_all_documents_uses_configured_root() {
        let tmp = TempDir::new().unwrap();
        write_corpus(tmp.path());
        let mut config = text_config(1000, 100);
        config.source.root = tmp.path().to_path_buf();
        let mut processor = DocumentProcessor::new(config);
        let report = processor.process_all_documents(&NoProgress).unwrap();
        assert_eq!(report.root, tmp.path());
        assert_eq!(report.chunks.len(), 3);
        assert_eq!(processor.next_chunk_id(), 3);
    }

    #[test]
    fn blank_pages_produce_no_chunks() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("blank.txt"), " \n\x0c\t\n").unwrap();
        let report = DocumentProcessor::new(text_config(200, 20))
            .process_directory(tmp.path(), &NoProgress)
            .unwrap();
        assert_eq!(report.files_processed, 1);
        assert!(report.chunks.is_empty());
    }
}
