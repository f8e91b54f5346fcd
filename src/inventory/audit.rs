//! Durable, append-only audit sinks for inventory log entries.

use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use tracing::Level;

/// Target used for every audit event, so a subscriber can route them to the
/// per-run log file.
pub const AUDIT_TARGET: &str = "tool_inventory::audit";

/// Unbounded, append-only record of every log entry.
///
/// Implementations stamp the time of the append themselves.
pub trait AuditSink: Send {
    fn append_timestamped(&mut self, level: Level, text: &str);
}

/// Forwards audit lines to `tracing` on [`AUDIT_TARGET`]. The subscriber
/// installed by the binary adds the timestamp and writes them to a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn append_timestamped(&mut self, level: Level, text: &str) {
        match level {
            Level::ERROR => tracing::error!(target: AUDIT_TARGET, "{text}"),
            Level::WARN => tracing::warn!(target: AUDIT_TARGET, "{text}"),
            Level::INFO => tracing::info!(target: AUDIT_TARGET, "{text}"),
            Level::DEBUG => tracing::debug!(target: AUDIT_TARGET, "{text}"),
            Level::TRACE => tracing::trace!(target: AUDIT_TARGET, "{text}"),
        }
    }
}

/// One line of an in-memory audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub text: String,
}

/// Keeps audit lines in memory. Clones share the same buffer, so a caller can
/// keep a handle while the event log owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    /// Just the texts, in append order.
    pub fn messages(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.text.clone()).collect()
    }
}

impl AuditSink for MemorySink {
    fn append_timestamped(&mut self, level: Level, text: &str) {
        self.records.lock().push(AuditRecord {
            timestamp: Local::now(),
            level,
            text: text.to_string(),
        });
    }
}
