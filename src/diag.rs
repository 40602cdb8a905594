//! Diagnostics sink
//!
//! Conversion is best-effort: malformed blocks, pages, or font scans are
//! skipped rather than aborting the run. The skipped work is reported
//! through an injectable sink so the core stays silent and testable.

use std::sync::Mutex;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagLevel {
    /// Progress and outcome messages
    Info,
    /// Recoverable problems (a unit of work was skipped)
    Warn,
    /// A whole conversion failed
    Error,
}

impl DiagLevel {
    /// Short label for console output
    pub fn label(&self) -> &'static str {
        match self {
            DiagLevel::Info => "info",
            DiagLevel::Warn => "warn",
            DiagLevel::Error => "error",
        }
    }
}

/// Consumer of leveled diagnostic messages
pub trait DiagnosticsSink {
    /// Record one message at the given level
    fn log(&self, level: DiagLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(DiagLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(DiagLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(DiagLevel::Error, message);
    }
}

/// Sink that writes to stderr, gated by verbosity
///
/// Warnings and errors are always shown; info messages only at `-v` and up.
pub struct ConsoleSink {
    verbose: u8,
}

impl ConsoleSink {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }
}

impl DiagnosticsSink for ConsoleSink {
    fn log(&self, level: DiagLevel, message: &str) {
        if level == DiagLevel::Info && self.verbose == 0 {
            return;
        }
        eprintln!("[{}] {}", level.label(), message);
    }
}

/// Sink that discards everything
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn log(&self, _level: DiagLevel, _message: &str) {}
}

/// Sink that retains messages in memory
///
/// Used by tests to assert on skip-and-continue behavior without capturing
/// process output.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<(DiagLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages in order
    pub fn records(&self) -> Vec<(DiagLevel, String)> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Count of messages at the given level
    pub fn count(&self, level: DiagLevel) -> usize {
        self.records().iter().filter(|(l, _)| *l == level).count()
    }
}

impl DiagnosticsSink for MemorySink {
    fn log(&self, level: DiagLevel, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }
}
