//! Line sinks used by the rendering loggers.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// A sink that receives pre-formatted log lines.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink.
    fn write_line(&self, line: &str);
}

/// Log sink that writes to stderr.
#[derive(Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        let mut stderr = std::io::stderr();
        if let Err(error) = stderr.write_all(line.as_bytes()) {
            eprintln!("log sink write failed: {error}");
        }
    }
}

/// Log sink that keeps lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every captured line.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }
}

impl LogSink for MemoryLogSink {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        guard.push(line.to_string());
    }
}
