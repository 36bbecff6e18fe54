//! # pagemark
//!
//! Rebuilds a single linear, annotated text stream from page layout data.
//!
//! A layout parser supplies, per page, positioned text and image blocks,
//! image placements and (optionally) natively detected table grids. The
//! pipeline orders blocks top to bottom, replaces images with figure
//! markers, appends native tables, and then runs two text passes over the
//! whole document: one wraps mathematical formulas, the other recognizes
//! tables that were flattened into plain lines.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagemark::extract_file;
//!
//! fn main() -> pagemark::Result<()> {
//!     let result = extract_file("layout.json", "figures")?;
//!     println!("{}", result.text_with_images);
//!     println!("{} figures", result.images.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Markers
//!
//! - `[FIGURE:<id>]`, `[FIGURE:<id>:extraction_failed]`, `[FIGURE:<id>:no_xref]`
//! - `[FORMULA: <text> :END_FORMULA]`, `[FORMULA_BLOCK: <text> :END_FORMULA_BLOCK]`
//! - `[TABLE_START]`, `[TABLE_ROW:<index>]`, `[TABLE_CELL: <text>]`, `[TABLE_END]`

pub mod annotate;
pub mod classify;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod source;

// Re-export commonly used types
pub use annotate::{
    annotate, validate_markers, AnnotationStats, Annotator, FormulaAggregator, TableAggregator,
    TableHeuristicConfig,
};
pub use classify::{
    is_formula_line, is_table_cell_candidate, FormulaClassifier, TableCellClassifier,
};
pub use error::{Error, Result};
pub use model::{
    BBox, BlockKind, ContentBlock, ExtractedImage, ExtractionResult, FigureRecord, ImageDescriptor,
    ImageHandle, PageContent, TableCandidate, TableRecord, TextLine,
};
pub use pipeline::{ImageMatching, PageSelection, Pipeline, PipelineContext, PipelineOptions};
pub use source::{JsonPageSource, LayoutDump, PageSource};

use std::path::{Path, PathBuf};

/// Process a layout dump file, writing figures to `output_dir`.
///
/// # Example
///
/// ```no_run
/// let result = pagemark::extract_file("layout.json", "figures").unwrap();
/// std::fs::write("annotated.txt", &result.text_with_images).unwrap();
/// ```
pub fn extract_file<P: AsRef<Path>, O: Into<PathBuf>>(
    path: P,
    output_dir: O,
) -> Result<ExtractionResult> {
    extract_file_with_options(path, PipelineOptions::new(output_dir))
}

/// Process a layout dump file with custom options.
///
/// # Example
///
/// ```no_run
/// use pagemark::{extract_file_with_options, PageSelection, PipelineOptions};
///
/// let options = PipelineOptions::new("figures")
///     .with_pages(PageSelection::parse("1-5").unwrap())
///     .with_tables(false);
/// let result = extract_file_with_options("layout.json", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: PipelineOptions,
) -> Result<ExtractionResult> {
    let source = JsonPageSource::open(path)?;
    extract(&source, options)
}

/// Process any [`PageSource`].
pub fn extract<S: PageSource + ?Sized>(
    source: &S,
    options: PipelineOptions,
) -> Result<ExtractionResult> {
    Pipeline::new(options).run(source)
}
