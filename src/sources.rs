use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::processor::{EmptyReason, ProcessError};
use crate::scanner::scan_directory;
use crate::stats::format_bytes;

/// List the documents `process` would pick up. Fails when there are none.
pub fn list_sources(config: &Config, root: &Path) -> Result<()> {
    let files = scan_directory(root, &config.source)?;

    if files.is_empty() {
        return Err(ProcessError::NoDocuments {
            root: root.to_path_buf(),
            reason: EmptyReason::for_root(root),
        }
        .into());
    }

    println!("Found {} documents in {}:", files.len(), root.display());
    println!("  {:<48} {:>10}   MODIFIED", "FILE", "SIZE");
    for file in &files {
        println!(
            "  {:<48} {:>10}   {}",
            file.relative_path,
            format_bytes(file.size_bytes),
            file.modified_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
