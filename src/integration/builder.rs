//! Builder for creating Region objects from various box formats.

use crate::inventory::Region;

/// Builder for creating `Region` objects from various box formats.
#[derive(Debug, Clone, Default)]
pub struct RegionBuilder {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
    area: Option<u32>,
}

impl RegionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2), bottom-right exclusive.
    pub fn tlbr(mut self, x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    /// Boxes reaching past the origin are clipped to it.
    pub fn xywh(mut self, cx: u32, cy: u32, w: u32, h: u32) -> Self {
        self.x1 = cx.saturating_sub(w / 2);
        self.y1 = cy.saturating_sub(h / 2);
        self.x2 = self.x1 + w;
        self.y2 = self.y1 + h;
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: u32, y: u32, w: u32, h: u32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    /// Set the blob outline area. Defaults to the full box.
    pub fn area(mut self, area: u32) -> Self {
        self.area = Some(area);
        self
    }

    pub fn build(self) -> Region {
        let region = Region::from_tlbr(self.x1, self.y1, self.x2, self.y2);
        match self.area {
            Some(area) => region.with_area(area),
            None => region,
        }
    }
}
