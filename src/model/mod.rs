//! Layout model types.
//!
//! These types describe what the layout parser hands over for each page
//! (blocks, image placements, native table grids) and what the pipeline
//! produces (figure records and the annotated text result).

mod block;
mod geometry;
mod image;
mod result;
mod table;

pub use block::{BlockKind, ContentBlock, PageContent, TextLine};
pub use geometry::BBox;
pub use image::{figure_id, ExtractedImage, FigureRecord, ImageDescriptor, ImageHandle};
pub use result::ExtractionResult;
pub use table::{TableCandidate, TableRecord};
