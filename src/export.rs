//! Export chunks as JSON Lines for the downstream indexer.
//!
//! One [`DocumentChunk`] per line, in chunk id order.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::DocumentChunk;

/// Write `chunks` as JSON Lines to `writer`.
pub fn write_jsonl<W: Write>(chunks: &[DocumentChunk], mut writer: W) -> Result<()> {
    for chunk in chunks {
        serde_json::to_writer(&mut writer, chunk)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Export chunks to `output`, or to stdout when `output` is `None`.
pub fn export_chunks(chunks: &[DocumentChunk], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_jsonl(chunks, std::io::BufWriter::new(file))?;
            tracing::info!(path = %path.display(), chunks = chunks.len(), "exported chunks");
        }
        None => {
            write_jsonl(chunks, std::io::stdout().lock())?;
        }
    }
    Ok(())
}
