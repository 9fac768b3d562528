//! Injected logging capability.
//!
//! Pipeline code reports through [`IngestLog`] instead of calling `tracing`
//! directly, so tests can assert on warnings without installing a subscriber.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Component that emitted the record, e.g. `search` or `feeds`.
    pub scope: String,
    pub message: String,
}

pub trait IngestLog: Send + Sync {
    fn log(&self, level: LogLevel, scope: &str, message: &str);

    fn info(&self, scope: &str, message: &str) {
        self.log(LogLevel::Info, scope, message);
    }

    fn warn(&self, scope: &str, message: &str) {
        self.log(LogLevel::Warn, scope, message);
    }

    fn error(&self, scope: &str, message: &str) {
        self.log(LogLevel::Error, scope, message);
    }
}

/// Forwards every record to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl IngestLog for TracingLog {
    fn log(&self, level: LogLevel, scope: &str, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "newsdesk_ingest", scope, "{message}"),
            LogLevel::Warn => tracing::warn!(target: "newsdesk_ingest", scope, "{message}"),
            LogLevel::Error => tracing::error!(target: "newsdesk_ingest", scope, "{message}"),
        }
    }
}

/// Keeps records in memory for later inspection.
#[derive(Debug, Default)]
pub struct RecordingLog {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count(&self, level: LogLevel) -> usize {
        self.records().iter().filter(|r| r.level == level).count()
    }

    /// True if any record at `level` contains `needle`.
    #[must_use]
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }
}

impl IngestLog for RecordingLog {
    fn log(&self, level: LogLevel, scope: &str, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                scope: scope.to_string(),
                message: message.to_string(),
            });
        }
    }
}
