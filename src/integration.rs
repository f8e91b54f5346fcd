//! Integration module for connecting cameras and detection backends with the
//! inventory tracker.
//!
//! This module provides the traits the core consumes as black boxes (frame
//! capture and detection) and the pipeline that drives one tick through them.

mod builder;
mod detector;
mod frame_source;
mod pipeline;

pub use builder::RegionBuilder;
pub use detector::DetectionSource;
pub use frame_source::{Disconnected, FrameSource, ImageFileSource};
pub use pipeline::{CameraSet, TickOutput, TrackerPipeline, View};
