//! Page sources: the layout parser seen from the pipeline.
//!
//! The pipeline never parses documents itself. It asks a [`PageSource`]
//! for each page's blocks and image placements, for the bytes behind an
//! image handle, and for natively detected table grids.

mod json;

pub use json::{ImageObject, JsonPageSource, LayoutDump, LayoutPage};

use crate::error::Result;
use crate::model::{ExtractedImage, ImageHandle, PageContent, TableCandidate};

/// Supplies per-page layout content to the pipeline.
///
/// Page numbers are 1-indexed.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Blocks and image descriptors for one page.
    fn page(&self, number: u32) -> Result<PageContent>;

    /// Raw bytes for an image handle.
    fn extract_image(&self, handle: ImageHandle) -> Result<ExtractedImage>;

    /// Native table candidates for one page.
    fn detect_tables(&self, _number: u32) -> Result<Vec<TableCandidate>> {
        Ok(Vec::new())
    }
}
