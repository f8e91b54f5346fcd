//! Bounded most-recent-first event log mirrored to an audit sink.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::Level;

use crate::inventory::audit::AuditSink;

/// Entries kept for live display.
pub const DEFAULT_LOG_CAPACITY: usize = 10;

/// Human-readable description of one counter change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub created_at: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            created_at: Local::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    sink: Box<dyn AuditSink>,
}

impl EventLog {
    pub fn new(sink: Box<dyn AuditSink>) -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY, sink)
    }

    pub fn with_capacity(capacity: usize, sink: Box<dyn AuditSink>) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            sink,
        }
    }

    /// Record an entry at the front, evicting the oldest past capacity.
    /// The audit sink always receives it, whatever gets evicted.
    pub fn append(&mut self, entry: LogEntry) {
        self.sink.append_timestamped(Level::INFO, &entry.message);
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Write to the audit sink only, bypassing the display buffer.
    pub fn note(&mut self, level: Level, text: &str) {
        self.sink.append_timestamped(level, text);
    }

    /// Messages currently held, most recent first.
    pub fn recent(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
