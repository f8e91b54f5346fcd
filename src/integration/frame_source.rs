//! Camera collaborators supplying raw frames.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;

/// A camera view that yields one raw frame per tick, or `None` when the
/// camera has nothing to give.
pub trait FrameSource: Send {
    fn grab(&mut self) -> Option<RgbImage>;
}

/// Re-reads a still image from disk on every grab, for a capture daemon that
/// keeps overwriting a snapshot file.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for ImageFileSource {
    fn grab(&mut self) -> Option<RgbImage> {
        match image::open(&self.path) {
            Ok(img) => Some(img.to_rgb8()),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Frame read failed");
                None
            }
        }
    }
}

/// A camera slot with nothing attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

impl FrameSource for Disconnected {
    fn grab(&mut self) -> Option<RgbImage> {
        None
    }
}

impl<F> FrameSource for F
where
    F: FnMut() -> Option<RgbImage> + Send,
{
    fn grab(&mut self) -> Option<RgbImage> {
        self()
    }
}
