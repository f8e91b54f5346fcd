//! Lifecycle owner for the inventory store and event log.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tracing::{Level, debug, info, warn};

use crate::error::{Error, Result};
use crate::inventory::audit::AuditSink;
use crate::inventory::detection::DetectionResult;
use crate::inventory::event_log::{EventLog, LogEntry};
use crate::inventory::reconcile::reconcile;
use crate::inventory::store::{CountsSnapshot, InventoryStore};

/// Owns the counters and the event log and enforces the explicit
/// initialize-before-reconcile lifecycle.
#[derive(Debug)]
pub struct ToolTracker {
    store: InventoryStore,
    log: EventLog,
    initialized: bool,
}

impl ToolTracker {
    pub fn new(log: EventLog) -> Self {
        Self {
            store: InventoryStore::new(),
            log,
            initialized: false,
        }
    }

    /// Tracker with the default log capacity writing to `sink`.
    pub fn with_sink(sink: impl AuditSink + 'static) -> Self {
        Self::new(EventLog::new(Box::new(sink)))
    }

    /// Take the baseline from one field-camera detection result.
    ///
    /// `None` means no frame could be captured: the call fails and any prior
    /// state is kept.
    pub fn initialize(&mut self, field: Option<&DetectionResult>) -> Result<()> {
        let Some(field) = field else {
            self.log.note(
                Level::ERROR,
                "Failed to grab initial frame from tool field camera",
            );
            return Err(Error::NoFrame("tool field".to_string()));
        };

        let tracked = self.store.initialize(field);
        self.initialized = true;

        let summary = serde_json::to_string(&self.store.get_counts()).unwrap_or_default();
        self.log
            .note(Level::INFO, &format!("Initial tool counts: {summary}"));
        info!(tracked_classes = tracked, counts = %summary, "Tool counts initialized");
        Ok(())
    }

    /// Drop all counters and take a fresh baseline. The event log is kept.
    pub fn reinitialize(&mut self, field: Option<&DetectionResult>) -> Result<()> {
        let was_initialized = self.initialized;
        self.initialize(field).inspect_err(|e| {
            warn!(error = %e, was_initialized, "Reinitialization failed, keeping prior counts");
        })
    }

    /// Advance the counters by one tick and return the entries produced.
    pub fn reconcile(
        &mut self,
        field: &DetectionResult,
        discard: &DetectionResult,
    ) -> Result<Vec<LogEntry>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }

        let entries = reconcile(&mut self.store, field, discard);
        for entry in &entries {
            debug!(entry = %entry, "Inventory changed");
            self.log.append(entry.clone());
        }
        Ok(entries)
    }

    pub fn counts(&self) -> CountsSnapshot {
        self.store.get_counts()
    }

    /// At most `log capacity` messages, most recent first.
    pub fn recent_log(&self) -> Vec<String> {
        self.log.recent()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }
}

/// Cloneable handle that serializes every tracker operation behind one lock.
#[derive(Debug, Clone)]
pub struct SharedTracker(Arc<Mutex<ToolTracker>>);

impl SharedTracker {
    pub fn new(tracker: ToolTracker) -> Self {
        Self(Arc::new(Mutex::new(tracker)))
    }

    /// Hold the lock across several operations.
    pub fn lock(&self) -> MutexGuard<'_, ToolTracker> {
        self.0.lock()
    }

    pub fn initialize(&self, field: Option<&DetectionResult>) -> Result<()> {
        self.0.lock().initialize(field)
    }

    pub fn reinitialize(&self, field: Option<&DetectionResult>) -> Result<()> {
        self.0.lock().reinitialize(field)
    }

    pub fn reconcile(
        &self,
        field: &DetectionResult,
        discard: &DetectionResult,
    ) -> Result<Vec<LogEntry>> {
        self.0.lock().reconcile(field, discard)
    }

    pub fn counts(&self) -> CountsSnapshot {
        self.0.lock().counts()
    }

    pub fn recent_log(&self) -> Vec<String> {
        self.0.lock().recent_log()
    }

    pub fn is_initialized(&self) -> bool {
        self.0.lock().is_initialized()
    }
}

impl From<ToolTracker> for SharedTracker {
    fn from(tracker: ToolTracker) -> Self {
        Self::new(tracker)
    }
}
