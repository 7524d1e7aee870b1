//! Overlapping, word-boundary text chunker.
//!
//! Splits normalized page text into spans of at most `max_chars`
//! characters, where each span after the first repeats the last
//! `overlap_chars` characters of its predecessor. Spans are produced lazily
//! by [`ChunkSpans`].
//!
//! # Algorithm
//!
//! 1. Start the first span at character 0.
//! 2. If the rest of the text fits in `max_chars`, emit it and stop.
//! 3. Otherwise look for the last word boundary (a position next to
//!    whitespace) in `(start + overlap_chars, start + max_chars]` and end
//!    the span there. With no boundary in range, hard-cut at `max_chars`.
//! 4. Start the next span `overlap_chars` characters before the previous end.
//!
//! Because every span starts exactly `overlap_chars` before the previous
//! one ended, dropping the first `overlap_chars` characters of each span
//! after the first and concatenating gives back the input text.
//!
//! # Example
//!
//! ```rust
//! use docchunk::chunk::chunk_spans;
//! use docchunk::config::ChunkingConfig;
//!
//! let config = ChunkingConfig { max_chars: 200, overlap_chars: 20 };
//! let spans: Vec<&str> = chunk_spans("Hello world.", config).collect();
//! assert_eq!(spans, vec!["Hello world."]);
//! ```

use sha2::{Digest, Sha256};

use crate::config::ChunkingConfig;

/// Lazy iterator over the chunk spans of one page.
///
/// Indices are in characters, not bytes, so multi-byte text never splits
/// inside a code point.
pub struct ChunkSpans<'a> {
    text: &'a str,
    /// Byte offset of every char, followed by `text.len()`.
    offsets: Vec<usize>,
    max_chars: usize,
    overlap_chars: usize,
    start: usize,
    done: bool,
}

/// Split `text` into overlapping spans according to `config`.
///
/// Empty text yields no spans; text of at most `max_chars` characters
/// yields exactly one. `config.overlap_chars` must be smaller than
/// `config.max_chars` (enforced by config validation).
pub fn chunk_spans(text: &str, config: ChunkingConfig) -> ChunkSpans<'_> {
    ChunkSpans::new(text, config)
}

impl<'a> ChunkSpans<'a> {
    pub fn new(text: &'a str, config: ChunkingConfig) -> Self {
        let max_chars = config.max_chars.max(1);
        let overlap_chars = config.overlap_chars.min(max_chars - 1);
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        Self {
            text,
            offsets,
            max_chars,
            overlap_chars,
            start: 0,
            done: text.is_empty(),
        }
    }

    fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.text[self.offsets[from]..self.offsets[to]]
    }

    fn is_space_at(&self, index: usize) -> bool {
        self.slice(index, index + 1)
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
    }

    /// A cut at `index` falls between two words, not inside one.
    fn is_word_boundary(&self, index: usize) -> bool {
        self.is_space_at(index) || self.is_space_at(index - 1)
    }

    fn find_end(&self) -> usize {
        let len = self.char_len();
        let hard_end = self.start + self.max_chars;
        if hard_end >= len {
            return len;
        }
        // Ending at or before start + overlap would not advance the next span.
        let min_end = self.start + self.overlap_chars + 1;
        (min_end..=hard_end)
            .rev()
            .find(|&end| self.is_word_boundary(end))
            .unwrap_or(hard_end)
    }
}

impl<'a> Iterator for ChunkSpans<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let end = self.find_end();
        let span = self.slice(self.start, end);
        if end >= self.char_len() {
            self.done = true;
        } else {
            self.start = end - self.overlap_chars;
        }
        Some(span)
    }
}

impl std::iter::FusedIterator for ChunkSpans<'_> {}

/// Normalize extracted page text before chunking.
///
/// Drops NUL characters, trims every line, collapses runs of inline
/// whitespace to a single space and runs of blank lines to one blank line.
pub fn normalize_whitespace(text: &str) -> String {
    let cleaned = text.replace('\0', "");
    let mut out = String::with_capacity(cleaned.len());
    let mut pending_blank = false;
    for line in cleaned.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push_str(if pending_blank { "\n\n" } else { "\n" });
        }
        out.push_str(&collapsed);
        pending_blank = false;
    }
    out
}

/// SHA-256 of the chunk text, hex-encoded.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
