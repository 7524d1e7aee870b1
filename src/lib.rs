//! # docchunk
//!
//! Batch ingestion of support documentation for retrieval-augmented AI
//! assistants.
//!
//! docchunk scans a directory of documents (PDF, optionally plain text),
//! extracts the text of each page, splits pages into bounded overlapping
//! chunks, tags each chunk with provenance and a keyword-heuristic topic
//! category, and hands the result to a downstream indexer as JSON Lines.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐   ┌─────────┐   ┌─────────┐   ┌────────┐   ┌──────────┐
//! │ Scanner │──▶│ Extract │──▶│  Chunk  │──▶│  Tag   │──▶│  Export  │
//! │  (fs)   │   │ per page│   │ overlap │   │keywords│   │  JSONL   │
//! └─────────┘   └─────────┘   └─────────┘   └────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! docchunk scan data/raw                       # list eligible documents
//! docchunk process data/raw                    # chunk and summarize
//! docchunk process --output out/chunks.jsonl   # export for the indexer
//! docchunk tag "How do I get a refund?"        # try the tagger
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`scanner`] | Directory scanning |
//! | [`extract`] | Per-page text extraction |
//! | [`chunk`] | Overlapping text chunking |
//! | [`tagger`] | Keyword category tagging |
//! | [`processor`] | Pipeline orchestration |
//! | [`export`] | JSON Lines output |
//! | [`progress`] | Progress reporting |
//! | [`stats`] | Run summaries |

pub mod chunk;
pub mod config;
pub mod export;
pub mod extract;
pub mod models;
pub mod processor;
pub mod progress;
pub mod scanner;
pub mod sources;
pub mod stats;
pub mod tagger;
