//! The page pipeline.
//!
//! Pages are processed strictly in order. Each page's blocks are merged into
//! stream pieces with figure markers, native tables are appended, and pages
//! are joined with a blank line. The formula and table passes then run once
//! over the whole document text.

mod merger;
mod native_table;
mod options;

pub use merger::BlockMerger;
pub use native_table::NativeTableFormatter;
pub use options::{ImageMatching, PageSelection, PipelineOptions, DEFAULT_MATCH_TOLERANCE};

use std::fs;
use std::path::{Path, PathBuf};

use crate::annotate::{Annotator, FormulaAggregator, TableAggregator};
use crate::error::Result;
use crate::model::{figure_id, ExtractionResult, FigureRecord};
use crate::source::PageSource;

/// Separator inserted between pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Document-wide mutable state threaded through page processing.
#[derive(Debug)]
pub struct PipelineContext {
    output_dir: PathBuf,
    figure_seq: u32,
    pages: Vec<String>,
    images: Vec<FigureRecord>,
}

impl PipelineContext {
    /// Create an empty context writing figures to `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            figure_seq: 0,
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Allocate the next figure id (`pdfimg1`, `pdfimg2`, ...).
    pub fn next_figure_id(&mut self) -> String {
        self.figure_seq += 1;
        figure_id(self.figure_seq)
    }

    /// Number of figure ids allocated so far.
    pub fn figures_allocated(&self) -> u32 {
        self.figure_seq
    }

    /// Directory figures are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Figures recorded so far.
    pub fn images(&self) -> &[FigureRecord] {
        &self.images
    }

    /// Append a finished page.
    pub fn push_page(&mut self, text: String) {
        self.pages.push(text);
    }

    /// Joined document text and the recorded figures.
    pub fn finish(self) -> (String, Vec<FigureRecord>) {
        (self.pages.join(PAGE_SEPARATOR), self.images)
    }
}

/// Runs a [`PageSource`] through merging and annotation.
#[derive(Debug)]
pub struct Pipeline {
    options: PipelineOptions,
    merger: BlockMerger,
    tables: NativeTableFormatter,
    annotator: Annotator,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(options: PipelineOptions) -> Self {
        let merger = BlockMerger::new(options.image_matching, options.match_tolerance);
        let annotator = Annotator::new()
            .with_formula_pass(options.detect_formulas.then(FormulaAggregator::new))
            .with_table_pass(
                options
                    .detect_tables
                    .then(|| TableAggregator::with_config(options.table.clone())),
            );

        Self {
            options,
            merger,
            tables: NativeTableFormatter::new(),
            annotator,
        }
    }

    /// Options in use.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Process every selected page of `source`.
    ///
    /// Fails if the output directory cannot be created or a page cannot be
    /// read. Figure extraction failures are logged and leave a marker.
    pub fn run<S: PageSource + ?Sized>(&self, source: &S) -> Result<ExtractionResult> {
        fs::create_dir_all(&self.options.output_dir)?;

        let mut ctx = PipelineContext::new(&self.options.output_dir);
        let total = source.page_count();

        for number in 1..=total {
            if !self.options.pages.includes(number) {
                continue;
            }
            let text = self.process_page(&mut ctx, source, number)?;
            ctx.push_page(text);
        }

        let figures = ctx.figures_allocated();
        let (text, images) = ctx.finish();
        let (annotated, stats) = self.annotator.annotate(&text);

        log::info!(
            "{} pages: {} figures ({} saved), {} formulas, {} formula blocks, {} tables",
            total,
            figures,
            images.len(),
            stats.formulas,
            stats.formula_blocks,
            stats.tables
        );

        Ok(ExtractionResult::new(annotated, images))
    }

    /// Merge one page and append its native tables.
    pub fn process_page<S: PageSource + ?Sized>(
        &self,
        ctx: &mut PipelineContext,
        source: &S,
        number: u32,
    ) -> Result<String> {
        let content = source.page(number)?;
        let mut pieces = self
            .merger
            .merge_page(ctx, source, number, &content.blocks, &content.images);

        if self.options.native_tables {
            match source.detect_tables(number) {
                Ok(candidates) => {
                    for table in self.tables.accept(candidates) {
                        pieces.extend(self.tables.format(&table));
                    }
                }
                Err(e) => log::warn!("Native table detection failed on page {}: {}", number, e),
            }
        }

        Ok(pieces.join("\n"))
    }
}
