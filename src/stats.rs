//! Run summaries.
//!
//! Turns a [`ProcessReport`] into the overview printed by `docchunk process`:
//! file and chunk counts plus per-category and per-source breakdowns.

use std::collections::BTreeMap;

use crate::models::Category;
use crate::processor::ProcessReport;

/// Per-source breakdown of chunk and page counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStats {
    pub source: String,
    pub chunk_count: usize,
    pub page_count: usize,
}

/// Chunk counts for every category, in declaration order (zeros included).
pub fn category_counts(report: &ProcessReport) -> Vec<(Category, usize)> {
    let mut counts: BTreeMap<Category, usize> =
        Category::ALL.iter().map(|c| (*c, 0)).collect();
    for chunk in &report.chunks {
        *counts.entry(chunk.category).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Chunk and distinct page counts per source file, sorted by source name.
pub fn source_stats(report: &ProcessReport) -> Vec<SourceStats> {
    let mut by_source: BTreeMap<&str, (usize, std::collections::BTreeSet<u32>)> = BTreeMap::new();
    for chunk in &report.chunks {
        let entry = by_source.entry(chunk.source.as_str()).or_default();
        entry.0 += 1;
        entry.1.insert(chunk.page);
    }
    by_source
        .into_iter()
        .map(|(source, (chunk_count, pages))| SourceStats {
            source: source.to_string(),
            chunk_count,
            page_count: pages.len(),
        })
        .collect()
}

/// Print the run summary to stdout.
pub fn print_summary(report: &ProcessReport) {
    println!("process {}", report.root.display());
    println!("  files found: {}", report.files_found);
    println!("  files processed: {}", report.files_processed);
    println!("  files skipped: {}", report.failures.len());
    println!("  chunks created: {}", report.chunks.len());

    println!();
    println!("  By category:");
    println!("  {:<12} {:>8}", "CATEGORY", "CHUNKS");
    println!("  {}", "-".repeat(21));
    for (category, count) in category_counts(report) {
        println!("  {:<12} {:>8}", category.as_str(), count);
    }

    let sources = source_stats(report);
    if !sources.is_empty() {
        println!();
        println!("  By source:");
        println!("  {:<40} {:>6} {:>8}", "SOURCE", "PAGES", "CHUNKS");
        println!("  {}", "-".repeat(56));
        for s in &sources {
            println!("  {:<40} {:>6} {:>8}", s.source, s.page_count, s.chunk_count);
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("  Skipped:");
        for failure in &report.failures {
            println!("  {}: {}", failure.file, failure.error);
        }
    }
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
