//! Color segmentation detector: HSV threshold, connected components, area filter.

use std::convert::Infallible;

use image::RgbImage;
use ndarray::Array2;
use tracing::trace;

use crate::integration::{DetectionSource, RegionBuilder};
use crate::inventory::{DetectionResult, Region};
use crate::vision::hsv::{ColorRange, Hsv, rgb_to_hsv};

/// Blobs must be strictly larger than this many pixels to count.
pub const DEFAULT_MIN_AREA: u32 = 500;

/// Finds color-tagged objects by thresholding each configured HSV range and
/// boxing every sufficiently large 8-connected blob of matching pixels.
#[derive(Debug, Clone)]
pub struct ColorDetector {
    min_area: u32,
}

impl Default for ColorDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AREA)
    }
}

impl ColorDetector {
    pub fn new(min_area: u32) -> Self {
        Self { min_area }
    }

    pub fn min_area(&self) -> u32 {
        self.min_area
    }

    /// Run every range over `frame`. Each range gets an entry, empty when
    /// nothing matched, in the order given.
    pub fn detect_frame(&self, frame: &RgbImage, ranges: &[ColorRange]) -> DetectionResult {
        let hsv = hsv_grid(frame);
        let mut result = DetectionResult::new();

        for range in ranges {
            let mask = hsv.map(|px| range.contains(*px));
            let regions = self.connected_regions(&mask);
            trace!(class = %range.name, detections = regions.len(), "Color mask scanned");
            result.insert(range.name.clone(), regions);
        }

        result
    }

    /// Bounding boxes of the 8-connected blobs in `mask` whose outline area
    /// exceeds the minimum, in raster order of their first pixel.
    fn connected_regions(&self, mask: &Array2<bool>) -> Vec<Region> {
        let (height, width) = mask.dim();
        let mut visited = Array2::<bool>::from_elem((height, width), false);
        let mut regions = Vec::new();
        let mut stack = Vec::new();

        for y in 0..height {
            for x in 0..width {
                if !mask[[y, x]] || visited[[y, x]] {
                    continue;
                }

                let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
                let mut pixels = 0u32;
                let mut edge_pixels = 0u32;
                visited[[y, x]] = true;
                stack.push((y, x));

                while let Some((cy, cx)) = stack.pop() {
                    pixels += 1;
                    min_x = min_x.min(cx);
                    max_x = max_x.max(cx);
                    min_y = min_y.min(cy);
                    max_y = max_y.max(cy);
                    if is_edge_pixel(mask, cy, cx) {
                        edge_pixels += 1;
                    }

                    for ny in cy.saturating_sub(1)..=(cy + 1).min(height - 1) {
                        for nx in cx.saturating_sub(1)..=(cx + 1).min(width - 1) {
                            if mask[[ny, nx]] && !visited[[ny, nx]] {
                                visited[[ny, nx]] = true;
                                stack.push((ny, nx));
                            }
                        }
                    }
                }

                let area = outline_area(pixels, edge_pixels);
                if area > self.min_area {
                    regions.push(
                        RegionBuilder::new()
                            .tlbr(min_x as u32, min_y as u32, max_x as u32 + 1, max_y as u32 + 1)
                            .area(area)
                            .build(),
                    );
                }
            }
        }

        regions
    }
}

/// A blob pixel with a 4-neighbour outside the mask or the frame.
fn is_edge_pixel(mask: &Array2<bool>, y: usize, x: usize) -> bool {
    let (height, width) = mask.dim();
    y == 0
        || x == 0
        || y + 1 == height
        || x + 1 == width
        || !mask[[y - 1, x]]
        || !mask[[y + 1, x]]
        || !mask[[y, x - 1]]
        || !mask[[y, x + 1]]
}

/// Area enclosed by the polygon through the centers of the blob's edge
/// pixels, by Pick's theorem: `interior + edge / 2 - 1`. A solid `w` x `h`
/// rectangle gives `(w - 1) * (h - 1)`. Holes are not filled.
fn outline_area(pixels: u32, edge_pixels: u32) -> u32 {
    (2 * pixels).saturating_sub(edge_pixels + 2) / 2
}

fn hsv_grid(frame: &RgbImage) -> Array2<Hsv> {
    let (width, height) = frame.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        let [r, g, b] = frame.get_pixel(x as u32, y as u32).0;
        rgb_to_hsv(r, g, b)
    })
}

impl DetectionSource for ColorDetector {
    type Error = Infallible;

    fn detect(
        &mut self,
        frame: &RgbImage,
        ranges: &[ColorRange],
    ) -> Result<DetectionResult, Self::Error> {
        Ok(self.detect_frame(frame, ranges))
    }
}
