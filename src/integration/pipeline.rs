//! TrackerPipeline for combining capture, detection and inventory reconciliation.

use std::fmt;

use image::{Rgb, RgbImage};
use tracing::{Level, debug, error, warn};

use crate::error::{Error, Result};
use crate::integration::{DetectionSource, FrameSource};
use crate::inventory::{DetectionResult, LogEntry, SharedTracker};
use crate::vision::{
    self, ColorRange, FRAME_HEIGHT, FRAME_WIDTH, draw_detections, draw_label_bar, log_panel,
};

/// The three camera perspectives over the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Tool staging area
    Field,
    /// Disposal area
    Discard,
    /// General work area, displayed only
    Work,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Field => "tool field",
            View::Discard => "discard area",
            View::Work => "work area",
        }
    }

    fn label_color(&self) -> Rgb<u8> {
        match self {
            View::Field => Rgb([255, 255, 255]),
            View::Discard => Rgb([255, 140, 0]),
            View::Work => Rgb([0, 120, 255]),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One frame source per view.
pub struct CameraSet {
    pub field: Box<dyn FrameSource>,
    pub discard: Box<dyn FrameSource>,
    pub work: Box<dyn FrameSource>,
}

impl CameraSet {
    pub fn new(
        field: impl FrameSource + 'static,
        discard: impl FrameSource + 'static,
        work: impl FrameSource + 'static,
    ) -> Self {
        Self {
            field: Box::new(field),
            discard: Box::new(discard),
            work: Box::new(work),
        }
    }

    fn source_mut(&mut self, view: View) -> &mut dyn FrameSource {
        match view {
            View::Field => self.field.as_mut(),
            View::Discard => self.discard.as_mut(),
            View::Work => self.work.as_mut(),
        }
    }
}

/// Everything one tick produced: annotated standardized frames, the
/// detections that drove reconciliation and the resulting log entries.
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub field: RgbImage,
    pub discard: RgbImage,
    pub work: RgbImage,
    pub field_detections: DetectionResult,
    pub discard_detections: DetectionResult,
    pub entries: Vec<LogEntry>,
}

impl TickOutput {
    /// 2x2 grid (field | discard over work | log panel) at half resolution.
    pub fn composite(&self, recent_entries: usize) -> RgbImage {
        let (w, h) = self.field.dimensions();
        let panel = log_panel(w, h, recent_entries);
        vision::half_size(&vision::composite(
            &self.field,
            &self.discard,
            &self.work,
            &panel,
        ))
    }
}

/// A combined tracker that bundles frame capture, detection and the
/// inventory tracker.
///
/// Each [`tick`](Self::tick) captures all three views, standardizes them,
/// runs the detector over them and reconciles the field and discard
/// detections into the shared tracker.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    ranges: Vec<ColorRange>,
    cameras: CameraSet,
    tracker: SharedTracker,
    frame_size: (u32, u32),
}

impl<D> TrackerPipeline<D>
where
    D: DetectionSource,
    D::Error: fmt::Display,
{
    pub fn new(
        detector: D,
        ranges: Vec<ColorRange>,
        cameras: CameraSet,
        tracker: SharedTracker,
    ) -> Self {
        Self {
            detector,
            ranges,
            cameras,
            tracker,
            frame_size: (FRAME_WIDTH, FRAME_HEIGHT),
        }
    }

    /// Size every view is standardized to.
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = (width, height);
        self
    }

    /// (Re)take the inventory baseline from one field-camera frame.
    ///
    /// Fails, leaving the counters untouched, when the field camera has no
    /// frame or the detector errors.
    pub fn initialize(&mut self) -> Result<()> {
        let detections = match self.capture(View::Field) {
            Some(frame) => Some(
                self.detector
                    .detect(&frame, &self.ranges)
                    .map_err(|e| Error::Detection(e.to_string()))?,
            ),
            None => None,
        };
        self.tracker.reinitialize(detections.as_ref())
    }

    /// Run one capture/detect/reconcile pass.
    ///
    /// Returns `Ok(None)` when no camera produced a frame. A single missing
    /// view is shown as a placeholder and counts as zero detections. Until
    /// the tracker has a baseline, the first tick with a field frame and a
    /// working detector takes it. The work view is only displayed.
    pub fn tick(&mut self) -> Result<Option<TickOutput>> {
        let field = self.capture(View::Field);
        let discard = self.capture(View::Discard);
        let work = self.capture(View::Work);

        if field.is_none() && discard.is_none() && work.is_none() {
            error!("All cameras failed to grab frames");
            self.tracker
                .lock()
                .log_mut()
                .note(Level::ERROR, "All cameras failed to grab frames");
            return Ok(None);
        }

        let (mut field, field_detections) = self.detect_view(View::Field, field);
        let (mut discard, discard_detections) = self.detect_view(View::Discard, discard);
        let mut work = work.unwrap_or_else(|| self.placeholder());

        if let Some(detections) = &field_detections
            && !self.tracker.is_initialized()
        {
            self.tracker.reinitialize(Some(detections))?;
        }

        let field_detections = field_detections.unwrap_or_default();
        let discard_detections = discard_detections.unwrap_or_default();
        debug!(
            field = field_detections.total_regions(),
            discard = discard_detections.total_regions(),
            "Frame detections"
        );

        let entries = match self.tracker.reconcile(&field_detections, &discard_detections) {
            Ok(entries) => entries,
            Err(Error::NotInitialized) => {
                debug!("Skipping reconciliation, tool counts not initialized");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        draw_detections(&mut field, &field_detections);
        draw_detections(&mut discard, &discard_detections);
        for (frame, view) in [
            (&mut field, View::Field),
            (&mut discard, View::Discard),
            (&mut work, View::Work),
        ] {
            draw_label_bar(frame, view.label_color());
        }

        Ok(Some(TickOutput {
            field,
            discard,
            work,
            field_detections,
            discard_detections,
            entries,
        }))
    }

    fn capture(&mut self, view: View) -> Option<RgbImage> {
        let (width, height) = self.frame_size;
        let frame = self.cameras.source_mut(view).grab();
        if frame.is_none() {
            debug!(view = %view, "Camera returned no frame");
        }
        frame.map(|f| vision::standardize(&f, width, height))
    }

    fn placeholder(&self) -> RgbImage {
        let (width, height) = self.frame_size;
        vision::placeholder(width, height)
    }

    /// Detect on a captured frame, or substitute a placeholder. Detections
    /// are `None` when there was no frame or the detector failed.
    fn detect_view(
        &mut self,
        view: View,
        frame: Option<RgbImage>,
    ) -> (RgbImage, Option<DetectionResult>) {
        let Some(frame) = frame else {
            return (self.placeholder(), None);
        };
        match self.detector.detect(&frame, &self.ranges) {
            Ok(detections) => (frame, Some(detections)),
            Err(e) => {
                warn!(view = %view, error = %e, "Detection failed, treating view as empty");
                (frame, None)
            }
        }
    }

    pub fn ranges(&self) -> &[ColorRange] {
        &self.ranges
    }

    pub fn tracker(&self) -> &SharedTracker {
        &self.tracker
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }
}
