mod audit;
mod counters;
mod detection;
mod event_log;
mod reconcile;
mod region;
mod store;
mod tracker;

pub use audit::{AUDIT_TARGET, AuditRecord, AuditSink, MemorySink, TracingSink};
pub use counters::InventoryCounters;
pub use detection::DetectionResult;
pub use event_log::{DEFAULT_LOG_CAPACITY, EventLog, LogEntry};
pub use reconcile::reconcile;
pub use region::Region;
pub use store::{CountsSnapshot, InventoryStore};
pub use tracker::{SharedTracker, ToolTracker};
