//! Image descriptors, extracted bytes and figure records.

use super::BBox;
use serde::{Deserialize, Serialize};

/// Opaque key the parser uses to pull image bytes out of the document.
///
/// Mirrors a cross-reference number: `0` means the placement has no
/// extractable image object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub u32);

impl ImageHandle {
    /// Check if the handle points at an extractable object.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

/// An image placement reported by the parser, independent of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Placement on the page
    pub bbox: BBox,

    /// Extraction handle
    #[serde(rename = "xref", default)]
    pub handle: ImageHandle,
}

impl ImageDescriptor {
    /// Create a new descriptor.
    pub fn new(bbox: BBox, handle: ImageHandle) -> Self {
        Self { bbox, handle }
    }
}

/// Raw image bytes returned by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedImage {
    /// Encoded image data
    pub data: Vec<u8>,

    /// File extension without the dot (e.g. "png")
    pub ext: String,
}

impl ExtractedImage {
    /// Create an extracted image.
    pub fn new(data: Vec<u8>, ext: impl Into<String>) -> Self {
        Self {
            data,
            ext: ext.into(),
        }
    }

    /// File name for a figure id.
    pub fn filename(&self, id: &str) -> String {
        let ext = self.ext.trim_start_matches('.');
        let ext = if ext.is_empty() { "png" } else { ext };
        format!("{}.{}", id, ext)
    }
}

/// A figure that was matched and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureRecord {
    /// Document-wide id, `pdfimg<N>`
    pub id: String,

    /// File name inside the output directory
    pub filename: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Bounding box of the image block
    pub bbox: BBox,
}

/// Format the figure id for a 1-based sequence number.
pub fn figure_id(seq: u32) -> String {
    format!("pdfimg{}", seq)
}
