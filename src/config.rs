use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/docchunk.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("data/raw")
}
fn default_include_globs() -> Vec<String> {
    vec!["**/*.pdf".to_string()]
}
fn default_max_file_bytes() -> u64 {
    50 * 1024 * 1024
}

/// Chunk bounds, measured in characters.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_overlap_chars")]
    pub overlap_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            overlap_chars: default_overlap_chars(),
        }
    }
}

fn default_max_chars() -> usize {
    1000
}
fn default_overlap_chars() -> usize {
    200
}

/// What to do when a single file cannot be read or extracted.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, record it in the report, and continue with the next file.
    #[default]
    Skip,
    /// Abort the whole batch on the first failure.
    Fail,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProcessingConfig {
    #[serde(default)]
    pub on_extract_error: ErrorPolicy,
}

/// Per-category keyword overrides. A category left unset keeps its
/// built-in keyword list.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CategoriesConfig {
    pub product: Option<Vec<String>>,
    pub billing: Option<Vec<String>>,
    pub technical: Option<Vec<String>>,
    pub account: Option<Vec<String>>,
}

impl Config {
    /// Built-in defaults, used when no config file is present.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Parse and validate config from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.chunking.max_chars == 0 {
        bail!("chunking.max_chars must be > 0");
    }
    if config.chunking.overlap_chars >= config.chunking.max_chars {
        bail!(
            "chunking.overlap_chars ({}) must be smaller than chunking.max_chars ({})",
            config.chunking.overlap_chars,
            config.chunking.max_chars
        );
    }

    if config.source.max_file_bytes == 0 {
        bail!("source.max_file_bytes must be > 0");
    }
    if config.source.include_globs.is_empty() {
        bail!("source.include_globs must list at least one pattern");
    }

    let overrides = [
        ("product", &config.categories.product),
        ("billing", &config.categories.billing),
        ("technical", &config.categories.technical),
        ("account", &config.categories.account),
    ];
    for (name, keywords) in overrides {
        if let Some(list) = keywords {
            if list.is_empty() || list.iter().any(|k| k.trim().is_empty()) {
                bail!("categories.{} must contain non-empty keywords", name);
            }
        }
    }

    Ok(())
}
