//! Document source scanner.
//!
//! Walks a directory and returns the recognized document files that match
//! the configured include globs and none of the exclude globs. An absent
//! root yields an empty list; deciding whether that is an error is left to
//! the caller.

use chrono::{DateTime, Utc};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::SourceConfig;
use crate::models::{ScannedFile, SourceKind};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to stat {path}: {source}")]
    Metadata {
        path: String,
        source: std::io::Error,
    },
}

/// Scan `root` using the filters in `source`.
///
/// Results are sorted by relative path for deterministic ordering.
pub fn scan_directory(root: &Path, source: &SourceConfig) -> Result<Vec<ScannedFile>, ScanError> {
    let include_set = build_globset(&source.include_globs)?;
    let exclude_set = build_globset(&source.exclude_globs)?;

    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "source directory does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(source.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        let Some(kind) = SourceKind::from_path(path) else {
            tracing::debug!(path = %rel_str, "skipping file with unrecognized extension");
            continue;
        };

        let metadata = entry.metadata().map_err(|e| ScanError::Metadata {
            path: rel_str.clone(),
            source: e.into(),
        })?;
        let modified_at: DateTime<Utc> = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::from(std::time::UNIX_EPOCH));

        files.push(ScannedFile {
            path: path.to_path_buf(),
            relative_path: rel_str,
            size_bytes: metadata.len(),
            modified_at,
            kind,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    tracing::debug!(root = %root.display(), count = files.len(), "scan complete");

    Ok(files)
}

/// Globs match case-insensitively, like extension recognition in
/// [`SourceKind::from_path`].
fn build_globset(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern).case_insensitive(true).build()?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source(include: &[&str], exclude: &[&str]) -> SourceConfig {
        SourceConfig {
            include_globs: include.iter().map(|s| s.to_string()).collect(),
            exclude_globs: exclude.iter().map(|s| s.to_string()).collect(),
            ..SourceConfig::default()
        }
    }

    #[test]
    fn missing_root_is_empty() {
        let files = scan_directory(Path::new("/definitely/not/here"), &SourceConfig::default())
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn finds_pdfs_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.pdf"), b"%PDF").unwrap();
        fs::write(tmp.path().join("a.PDF"), b"%PDF").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"text").unwrap();
        fs::create_dir_all(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("c.pdf"), b"%PDF").unwrap();

        let files = scan_directory(tmp.path(), &source(&["**/*.pdf"], &[])).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "sub/c.pdf"]);
        assert!(files.iter().all(|f| f.kind == SourceKind::Pdf));
        assert_eq!(files[0].size_bytes, 4);
    }

    #[test]
    fn default_config_finds_uppercase_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Guide.PDF"), b"%PDF").unwrap();

        let files = scan_directory(tmp.path(), &SourceConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "Guide.PDF");
        assert_eq!(files[0].kind, SourceKind::Pdf);
    }

    #[test]
    fn exclude_globs_apply() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("drafts")).unwrap();
        fs::write(tmp.path().join("keep.txt"), b"k").unwrap();
        fs::write(tmp.path().join("drafts").join("skip.txt"), b"s").unwrap();

        let files = scan_directory(tmp.path(), &source(&["**/*.txt"], &["drafts/**"])).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "keep.txt");
        assert_eq!(files[0].kind, SourceKind::PlainText);
    }

    #[test]
    fn unrecognized_extensions_are_ignored_even_if_globbed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("slides.pptx"), b"zip").unwrap();
        fs::write(tmp.path().join("guide.md"), b"# Guide").unwrap();

        let files = scan_directory(tmp.path(), &source(&["**/*"], &[])).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["guide.md"]);
    }

    #[test]
    fn invalid_glob_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = scan_directory(tmp.path(), &source(&["[unclosed"], &[])).unwrap_err();
        assert!(matches!(err, ScanError::Glob(_)));
    }
}
