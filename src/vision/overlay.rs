//! Detection overlays and the 2x2 composite view.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops;
use image::{Rgb, RgbImage};

use crate::error::Result;
use crate::inventory::{DetectionResult, Region};

pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const LABEL_BAR_HEIGHT: u32 = 12;
const LOG_ROW_HEIGHT: u32 = 30;

/// Outline `region` with a `thickness`-pixel border, clipped to the frame.
pub fn draw_region(frame: &mut RgbImage, region: &Region, color: Rgb<u8>, thickness: u32) {
    let (fw, fh) = frame.dimensions();
    let [x1, y1, x2, y2] = region.to_tlbr();
    let (x2, y2) = (x2.min(fw), y2.min(fh));

    for y in y1..y2 {
        for x in x1..x2 {
            let on_border = x < x1 + thickness
                || x + thickness >= x2
                || y < y1 + thickness
                || y + thickness >= y2;
            if on_border {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

/// Outline every detected region.
pub fn draw_detections(frame: &mut RgbImage, detections: &DetectionResult) {
    for (_, regions) in detections.iter() {
        for region in regions {
            draw_region(frame, region, BOX_COLOR, 2);
        }
    }
}

/// Solid strip along the bottom edge identifying the camera view.
pub fn draw_label_bar(frame: &mut RgbImage, color: Rgb<u8>) {
    let (w, h) = frame.dimensions();
    for y in h.saturating_sub(LABEL_BAR_HEIGHT)..h {
        for x in 0..w {
            frame.put_pixel(x, y, color);
        }
    }
}

/// Log panel: a header strip plus one row marker per recent entry, newest at
/// the top, as many as fit.
pub fn log_panel(width: u32, height: u32, entries: usize) -> RgbImage {
    let mut panel = RgbImage::new(width, height);
    draw_region(
        &mut panel,
        &Region::new(0, 0, width, LOG_ROW_HEIGHT),
        Rgb([255, 255, 255]),
        LOG_ROW_HEIGHT,
    );

    let rows = (height.saturating_sub(2 * LOG_ROW_HEIGHT) / LOG_ROW_HEIGHT) as usize;
    for row in 0..entries.min(rows) {
        let y = 2 * LOG_ROW_HEIGHT + row as u32 * LOG_ROW_HEIGHT;
        let shade = 255u8.saturating_sub((row as u8).saturating_mul(16));
        draw_region(
            &mut panel,
            &Region::new(10, y, width.saturating_sub(20), 4),
            Rgb([shade, shade, shade]),
            4,
        );
    }
    panel
}

/// Stack four equally sized views: top row `top_left | top_right`, bottom row
/// `bottom_left | bottom_right`.
pub fn composite(
    top_left: &RgbImage,
    top_right: &RgbImage,
    bottom_left: &RgbImage,
    bottom_right: &RgbImage,
) -> RgbImage {
    let (w, h) = top_left.dimensions();
    let mut out = RgbImage::new(w * 2, h * 2);
    imageops::replace(&mut out, top_left, 0, 0);
    imageops::replace(&mut out, top_right, i64::from(w), 0);
    imageops::replace(&mut out, bottom_left, 0, i64::from(h));
    imageops::replace(&mut out, bottom_right, i64::from(w), i64::from(h));
    out
}

pub fn encode_jpeg(frame: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(frame)?;
    Ok(buf.into_inner())
}
