//! Image-side collaborators of the inventory core: color segmentation,
//! frame standardization and the composited display.

mod color_detector;
mod frame;
mod hsv;
mod overlay;

pub use color_detector::{ColorDetector, DEFAULT_MIN_AREA};
pub use frame::{FRAME_HEIGHT, FRAME_WIDTH, half_size, placeholder, standardize};
pub use hsv::{ColorRange, Hsv, default_color_ranges, rgb_to_hsv};
pub use overlay::{
    BOX_COLOR, composite, draw_detections, draw_label_bar, draw_region, encode_jpeg, log_panel,
};
