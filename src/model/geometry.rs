//! Layout geometry.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in layout units, top-left origin.
///
/// Serialized as `[x0, y0, x1, y1]`, the shape upstream parsers emit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Top edge, the ordering key for blocks on a page.
    pub fn top(&self) -> f32 {
        self.y0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }

    /// Absolute distance between the vertical centers of two boxes.
    pub fn vertical_center_distance(&self, other: &BBox) -> f32 {
        (self.center_y() - other.center_y()).abs()
    }
}

impl From<[f32; 4]> for BBox {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<BBox> for [f32; 4] {
    fn from(bbox: BBox) -> Self {
        [bbox.x0, bbox.y0, bbox.x1, bbox.y1]
    }
}
