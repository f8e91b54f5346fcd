//! Frame standardization for the fixed-size camera views.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

pub const FRAME_WIDTH: u32 = 640;
pub const FRAME_HEIGHT: u32 = 480;

/// Scale `frame` to fit `width` x `height` keeping its aspect ratio, centered
/// on a black canvas.
pub fn standardize(frame: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (w, h) = frame.dimensions();
    let mut canvas = RgbImage::new(width, height);
    if w == 0 || h == 0 {
        return canvas;
    }

    let scale = (width as f32 / w as f32).min(height as f32 / h as f32);
    let new_w = ((w as f32 * scale) as u32).clamp(1, width);
    let new_h = ((h as f32 * scale) as u32).clamp(1, height);

    let resized = if (new_w, new_h) == (w, h) {
        frame.clone()
    } else {
        imageops::resize(frame, new_w, new_h, FilterType::Triangle)
    };

    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut canvas, &resized, i64::from(x_offset), i64::from(y_offset));
    canvas
}

/// Stand-in for a camera that returned no frame: black with a red band
/// across the middle.
pub fn placeholder(width: u32, height: u32) -> RgbImage {
    let band_top = height * 9 / 20;
    let band_bottom = height * 11 / 20;
    RgbImage::from_fn(width, height, |_, y| {
        if (band_top..band_bottom).contains(&y) {
            Rgb([200, 0, 0])
        } else {
            Rgb([0, 0, 0])
        }
    })
}

pub fn half_size(frame: &RgbImage) -> RgbImage {
    let (w, h) = frame.dimensions();
    imageops::resize(frame, (w / 2).max(1), (h / 2).max(1), FilterType::Triangle)
}
