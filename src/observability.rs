//! Logging setup and the host-facing task log

use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber, honouring `RUST_LOG`.
///
/// Logs go to stderr so stdout stays free for JSON output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Log sink supplied by the host for one operation.
///
/// `task` announces a step, `progress` reports a running byte count against
/// an optional total.
pub trait TaskLog: Send + Sync {
    fn task(&self, key: &str, message: &str);
    fn progress(&self, key: &str, done: u64, total: Option<u64>);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards everything to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl TaskLog for TracingLog {
    fn task(&self, key: &str, message: &str) {
        tracing::info!(task = key, "{message}");
    }

    fn progress(&self, key: &str, done: u64, total: Option<u64>) {
        tracing::info!(task = key, done, total, "progress");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Entry captured by [`RecordingLog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Task { key: String, message: String },
    Progress { key: String, done: u64, total: Option<u64> },
    Info(String),
    Error(String),
}

/// Keeps every entry in memory; used by tests and by callers that want to
/// inspect what happened after the fact.
#[derive(Debug, Default, Clone)]
pub struct RecordingLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn progress_for(&self, key: &str) -> Vec<(u64, Option<u64>)> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                LogEntry::Progress { key: k, done, total } if k == key => Some((done, total)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

impl TaskLog for RecordingLog {
    fn task(&self, key: &str, message: &str) {
        self.push(LogEntry::Task {
            key: key.to_string(),
            message: message.to_string(),
        });
    }

    fn progress(&self, key: &str, done: u64, total: Option<u64>) {
        self.push(LogEntry::Progress {
            key: key.to_string(),
            done,
            total,
        });
    }

    fn info(&self, message: &str) {
        self.push(LogEntry::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(LogEntry::Error(message.to_string()));
    }
}
