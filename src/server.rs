//! HTTP surface: counters, event log, audit log download and the MJPEG feed.

mod capture;
mod routes;
mod state;

pub use capture::run_capture_loop;
pub use routes::create_router;
pub use state::{AppState, FrameHub, LivePipeline};
