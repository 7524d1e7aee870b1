//! Processing progress reporting.
//!
//! Reports what `docchunk process` is doing while it runs. Progress is
//! emitted on **stderr** so stdout stays parseable for scripts.

use std::io::Write;

/// A single progress event from the processor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Walking the source directory. Total unknown.
    Scanning { root: String },
    /// About to process file `n` of `total` (1-based).
    Processing { file: String, n: u64, total: u64 },
    /// File finished with this many chunks.
    FileDone { file: String, chunks: u64 },
    /// File skipped after an extraction failure.
    FileFailed { file: String, error: String },
}

/// Receives progress events from the processor.
pub trait ProgressReporter {
    fn report(&self, event: ProgressEvent);
}

/// Human-friendly progress on stderr: "process  3 / 12  guide.pdf".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ProgressEvent) {
        let line = match &event {
            ProgressEvent::Scanning { root } => format!("process  scanning {}...\n", root),
            ProgressEvent::Processing { file, n, total } => format!(
                "process  {} / {}  {}\n",
                format_number(*n),
                format_number(*total),
                file
            ),
            ProgressEvent::FileDone { file, chunks } => {
                format!("process  {}  {} chunks\n", file, format_number(*chunks))
            }
            ProgressEvent::FileFailed { file, error } => {
                format!("process  {}  skipped: {}\n", file, error)
            }
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let obj = match &event {
            ProgressEvent::Scanning { root } => serde_json::json!({
                "event": "progress",
                "phase": "scanning",
                "root": root
            }),
            ProgressEvent::Processing { file, n, total } => serde_json::json!({
                "event": "progress",
                "phase": "processing",
                "file": file,
                "n": n,
                "total": total
            }),
            ProgressEvent::FileDone { file, chunks } => serde_json::json!({
                "event": "file_done",
                "file": file,
                "chunks": chunks
            }),
            ProgressEvent::FileFailed { file, error } => serde_json::json!({
                "event": "file_failed",
                "file": file,
                "error": error
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1), "1");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
