use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::integration::TrackerPipeline;
use crate::inventory::SharedTracker;
use crate::vision::ColorDetector;

/// Pipeline driven by the live capture loop.
pub type LivePipeline = TrackerPipeline<ColorDetector>;

/// Latest composited JPEG, fanned out to every video feed subscriber.
#[derive(Debug, Clone)]
pub struct FrameHub {
    tx: Arc<watch::Sender<Option<Bytes>>>,
}

impl Default for FrameHub {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHub {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn publish(&self, jpeg: Vec<u8>) {
        self.tx.send_replace(Some(Bytes::from(jpeg)));
    }

    pub fn latest(&self) -> Option<Bytes> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Bytes>> {
        self.tx.subscribe()
    }
}

/// Shared state for the HTTP handlers and the capture loop.
#[derive(Clone)]
pub struct AppState {
    pub tracker: SharedTracker,
    pub pipeline: Arc<Mutex<LivePipeline>>,
    pub frames: FrameHub,
    pub log_dir: PathBuf,
}

impl AppState {
    pub fn new(pipeline: LivePipeline, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            tracker: pipeline.tracker().clone(),
            pipeline: Arc::new(Mutex::new(pipeline)),
            frames: FrameHub::new(),
            log_dir: log_dir.into(),
        }
    }
}
