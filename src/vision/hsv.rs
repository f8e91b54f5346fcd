//! HSV conversion and named color ranges.
//!
//! Values use the 8-bit convention common to camera tooling:
//! H in 0-179 (degrees halved), S and V in 0-255.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Convert one RGB pixel to 8-bit HSV.
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let s = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    Hsv {
        h: ((h / 2.0).round() as u16 % 180) as u8,
        s: s.round() as u8,
        v: max as u8,
    }
}

/// Inclusive HSV bounds identifying one tracked class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub name: String,
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub fn new(name: impl Into<String>, lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            lower,
            upper,
        }
    }

    #[inline]
    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower[0]..=self.upper[0]).contains(&hsv.h)
            && (self.lower[1]..=self.upper[1]).contains(&hsv.s)
            && (self.lower[2]..=self.upper[2]).contains(&hsv.v)
    }

    /// Bounds whose lower value exceeds the upper one can never match.
    pub fn is_valid(&self) -> bool {
        self.lower.iter().zip(&self.upper).all(|(lo, hi)| lo <= hi)
    }
}

/// The neon tag colors the workspace is set up with.
pub fn default_color_ranges() -> Vec<ColorRange> {
    vec![
        ColorRange::new("neon_green", [35, 100, 100], [85, 255, 255]),
        ColorRange::new("neon_pink", [140, 100, 100], [180, 255, 255]),
        ColorRange::new("neon_blue", [90, 100, 100], [130, 255, 255]),
    ]
}
