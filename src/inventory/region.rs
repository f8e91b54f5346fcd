/// Pixel bounding box of one color blob found by a detector.
///
/// Coordinates use a top-left origin. `area` is the area enclosed by the
/// outline of the blob the box was cut from, which is usually smaller than
/// `width * height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    /// Top-left x coordinate
    pub x: u32,
    /// Top-left y coordinate
    pub y: u32,
    /// Width of the bounding box
    pub width: u32,
    /// Height of the bounding box
    pub height: u32,
    /// Outline area of the underlying blob
    pub area: u32,
}

impl Region {
    /// Create a Region from top-left coordinates and dimensions (TLWH format).
    /// The blob area defaults to the full box.
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            area: width * height,
        }
    }

    /// Create a Region from TLBR format. The bottom-right corner is exclusive.
    #[inline]
    pub fn from_tlbr(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    /// Replace the blob pixel count.
    #[inline]
    pub fn with_area(mut self, area: u32) -> Self {
        self.area = area;
        self
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [u32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Area of the bounding box itself, not of the blob.
    #[inline]
    pub fn box_area(&self) -> u32 {
        self.width * self.height
    }
}
