//! Pipeline options and configuration.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::annotate::TableHeuristicConfig;
use crate::error::{Error, Result};

/// Default maximum distance between an image block and a descriptor center.
pub const DEFAULT_MATCH_TOLERANCE: f32 = 50.0;

/// Options for running the page pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory extracted figures are written to (created if absent)
    pub output_dir: PathBuf,

    /// Which pages to process
    pub pages: PageSelection,

    /// Run the formula pass
    pub detect_formulas: bool,

    /// Run the heuristic table pass
    pub detect_tables: bool,

    /// Append natively detected tables after each page
    pub native_tables: bool,

    /// How image blocks claim descriptors
    pub image_matching: ImageMatching,

    /// Maximum vertical center distance for a descriptor match
    pub match_tolerance: f32,

    /// Heuristic table thresholds
    pub table: TableHeuristicConfig,
}

impl PipelineOptions {
    /// Create options writing figures to `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pages: PageSelection::All,
            detect_formulas: true,
            detect_tables: true,
            native_tables: true,
            image_matching: ImageMatching::default(),
            match_tolerance: DEFAULT_MATCH_TOLERANCE,
            table: TableHeuristicConfig::default(),
        }
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable the formula pass.
    pub fn with_formulas(mut self, enabled: bool) -> Self {
        self.detect_formulas = enabled;
        self
    }

    /// Enable or disable the heuristic table pass.
    pub fn with_tables(mut self, enabled: bool) -> Self {
        self.detect_tables = enabled;
        self
    }

    /// Enable or disable native table output.
    pub fn with_native_tables(mut self, enabled: bool) -> Self {
        self.native_tables = enabled;
        self
    }

    /// Set the image matching strategy.
    pub fn with_image_matching(mut self, matching: ImageMatching) -> Self {
        self.image_matching = matching;
        self
    }

    /// Set the descriptor match tolerance in layout units.
    pub fn with_match_tolerance(mut self, tolerance: f32) -> Self {
        self.match_tolerance = tolerance;
        self
    }

    /// Set heuristic table thresholds.
    pub fn with_table_config(mut self, config: TableHeuristicConfig) -> Self {
        self.table = config;
        self
    }
}

/// How image blocks are paired with image descriptors.
///
/// Both strategies are greedy: each block, in page order, takes the nearest
/// descriptor within the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMatching {
    /// A matched descriptor is not offered to later blocks
    #[default]
    Exclusive,
    /// Every block sees every descriptor, so two blocks may share one
    Shared,
}

/// Page selection.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let range = parse_range(start, end, s)?;
                return Ok(PageSelection::Range(range));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                pages.extend(parse_range(start, end, s)?);
            } else {
                pages.push(parse_page(part, s)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_range(start: &str, end: &str, whole: &str) -> Result<RangeInclusive<u32>> {
    let start = parse_page(start, whole)?;
    let end = parse_page(end, whole)?;
    if start > end {
        return Err(Error::InvalidPageRange(whole.to_string()));
    }
    Ok(start..=end)
}

fn parse_page(part: &str, whole: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(page) if page > 0 => Ok(page),
        _ => Err(Error::InvalidPageRange(whole.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_options_builder() {
        let options = PipelineOptions::new("out")
            .with_formulas(false)
            .with_native_tables(false)
            .with_image_matching(ImageMatching::Shared)
            .with_match_tolerance(30.0);

        assert!(!options.detect_formulas);
        assert!(options.detect_tables);
        assert!(!options.native_tables);
        assert_eq!(options.image_matching, ImageMatching::Shared);
        assert_eq!(options.match_tolerance, 30.0);
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::new("out");
        assert_eq!(options.match_tolerance, DEFAULT_MATCH_TOLERANCE);
        assert_eq!(options.image_matching, ImageMatching::Exclusive);
        assert_eq!(options.table.sequence_min_lines, Some(4));
    }

    #[test]
    fn test_page_selection_includes() {
        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3]);
        assert!(pages.includes(3));
        assert!(!pages.includes(2));
    }

    #[test]
    fn test_page_selection_parse() {
        assert!(matches!(PageSelection::parse("all").unwrap(), PageSelection::All));
        assert!(matches!(PageSelection::parse("1-10").unwrap(), PageSelection::Range(_)));

        match PageSelection::parse("1,3,5-7,3").unwrap() {
            PageSelection::Pages(pages) => assert_eq!(pages, vec![1, 3, 5, 6, 7]),
            other => panic!("Expected Pages variant, got {:?}", other),
        }

        assert!(matches!(
            PageSelection::parse("0-3"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(PageSelection::parse("a,b").is_err());
    }

    #[test]
    fn test_page_selection_rejects_reversed_range() {
        assert!(matches!(
            PageSelection::parse("3-1"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(
            PageSelection::parse("1,5-2"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(PageSelection::parse("2-2").unwrap(), PageSelection::Range(_)));
    }
}
