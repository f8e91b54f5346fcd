//! Trait for object detection backends.

use std::convert::Infallible;

use image::RgbImage;

use crate::inventory::DetectionResult;
use crate::vision::ColorRange;

/// Trait for object detection backends.
///
/// Implement this trait to feed any detector into the inventory pipeline.
/// Closures of the right shape implement it too, which is handy for replaying
/// recorded or synthetic detections.
///
/// # Example
///
/// ```ignore
/// use tool_inventory::{ColorRange, DetectionResult, DetectionSource};
///
/// struct MyDetector;
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &image::RgbImage, ranges: &[ColorRange]) -> Result<DetectionResult, Self::Error> {
///         Ok(DetectionResult::new())
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Find the regions of every class in `ranges` within one frame.
    ///
    /// The result should hold one entry per range, in the order given.
    fn detect(
        &mut self,
        frame: &RgbImage,
        ranges: &[ColorRange],
    ) -> Result<DetectionResult, Self::Error>;
}

impl<F> DetectionSource for F
where
    F: FnMut(&RgbImage, &[ColorRange]) -> DetectionResult,
{
    type Error = Infallible;

    fn detect(
        &mut self,
        frame: &RgbImage,
        ranges: &[ColorRange],
    ) -> Result<DetectionResult, Self::Error> {
        Ok(self(frame, ranges))
    }
}
