//! # docchunk CLI
//!
//! The `docchunk` binary runs the document ingestion pipeline.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docchunk scan [DIR]` | List the documents that would be processed |
//! | `docchunk process [DIR]` | Chunk and tag every document, print a summary |
//! | `docchunk tag "<text>"` | Show the category assigned to a piece of text |
//!
//! ## Examples
//!
//! ```bash
//! # Check what will be ingested
//! docchunk scan data/raw
//!
//! # Process with a config file and export chunks for the indexer
//! docchunk --config ./config/docchunk.toml process --output out/chunks.jsonl
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use docchunk::config::{self, Config};
use docchunk::export;
use docchunk::processor::DocumentProcessor;
use docchunk::progress::ProgressMode;
use docchunk::sources;
use docchunk::stats;
use docchunk::tagger::{tag_text, CategoryRules};

/// docchunk: turn a directory of support documents into tagged,
/// retrievable chunks.
///
/// Settings are read from `--config`, or from `./config/docchunk.toml` when
/// it exists; built-in defaults apply otherwise.
#[derive(Parser)]
#[command(
    name = "docchunk",
    about = "Chunk and tag support documentation for retrieval",
    version,
    long_about = "docchunk scans a directory of documents, extracts text per page, splits it \
    into bounded overlapping chunks, tags each chunk with its source, page and a topic category, \
    and exports the chunks for a downstream indexer."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress details (info level). `RUST_LOG` overrides.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List eligible documents in the source directory.
    ///
    /// Exits non-zero when the directory is missing or holds no documents.
    Scan {
        /// Source directory. Overrides `[source].root`.
        dir: Option<PathBuf>,
    },

    /// Chunk and tag every document in the source directory.
    ///
    /// Prints a summary to stdout. Exits non-zero with "no documents found"
    /// when the directory is missing or empty.
    Process {
        /// Source directory. Overrides `[source].root`.
        dir: Option<PathBuf>,

        /// Write chunks as JSON Lines to this file (`-` for stdout).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Progress output on stderr. Defaults to `human` on a TTY, `off` otherwise.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Print the category the keyword tagger assigns to TEXT.
    Tag {
        text: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return config::load_config(path);
    }
    let default_path = Path::new(config::DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return config::load_config(default_path);
    }
    tracing::debug!("no config file found, using defaults");
    Ok(Config::minimal())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan { dir } => {
            let root = dir.unwrap_or_else(|| cfg.source.root.clone());
            sources::list_sources(&cfg, &root)?;
        }
        Commands::Process {
            dir,
            output,
            progress,
        } => {
            let root = dir.unwrap_or_else(|| cfg.source.root.clone());
            let reporter = progress
                .unwrap_or_else(ProgressMode::default_for_tty)
                .reporter();

            let mut processor = DocumentProcessor::new(cfg);
            let report = processor.process_directory(&root, reporter.as_ref())?;

            match output.as_deref() {
                Some(path) if path == Path::new("-") => {
                    export::export_chunks(&report.chunks, None)?;
                }
                Some(path) => {
                    export::export_chunks(&report.chunks, Some(path))?;
                    stats::print_summary(&report);
                    println!("  exported: {}", path.display());
                    println!("ok");
                }
                None => {
                    stats::print_summary(&report);
                    println!("ok");
                }
            }
        }
        Commands::Tag { text } => {
            let rules = CategoryRules::from_config(&cfg.categories);
            println!("{}", tag_text(&text, &rules));
        }
    }

    Ok(())
}
