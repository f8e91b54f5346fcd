//! Color-tag tool inventory tracking.
//!
//! Three camera views (tool field, discard area, work area) are segmented by
//! HSV color range. Field and discard counts are reconciled every tick into
//! per-tool counters, and every change is written to a bounded event log
//! and a durable audit log.

pub mod config;
pub mod error;
pub mod integration;
pub mod inventory;
pub mod server;
pub mod vision;

pub use config::{CameraConfig, Config};
pub use error::{Error, Result};
pub use integration::{
    CameraSet, DetectionSource, Disconnected, FrameSource, ImageFileSource, RegionBuilder,
    TickOutput, TrackerPipeline, View,
};
pub use inventory::{
    CountsSnapshot, DetectionResult, EventLog, InventoryCounters, LogEntry, MemorySink, Region,
    SharedTracker, ToolTracker, TracingSink,
};
pub use vision::{ColorDetector, ColorRange, default_color_ranges};
