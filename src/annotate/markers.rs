//! Marker vocabulary of the annotated text stream.
//!
//! Markers are literal tokens that downstream authoring code uses as
//! insertion points. Each marker occupies a whole line of the stream.

use std::fmt;

use crate::error::{Error, Result};

const FIGURE_PREFIX: &str = "[FIGURE:";
const FORMULA_PREFIX: &str = "[FORMULA: ";
const FORMULA_SUFFIX: &str = " :END_FORMULA]";
const FORMULA_BLOCK_PREFIX: &str = "[FORMULA_BLOCK: ";
const FORMULA_BLOCK_SUFFIX: &str = " :END_FORMULA_BLOCK]";
const TABLE_START: &str = "[TABLE_START]";
const TABLE_END: &str = "[TABLE_END]";
const TABLE_ROW_PREFIX: &str = "[TABLE_ROW:";
const TABLE_CELL_PREFIX: &str = "[TABLE_CELL:";

/// Outcome recorded in a figure marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureStatus {
    /// Bytes were extracted and written
    Extracted,
    /// A descriptor matched but extraction or writing failed
    ExtractionFailed,
    /// No descriptor matched the block
    NoXref,
}

/// A single marker token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    /// `[FIGURE:<id>]` and its failure variants
    Figure {
        /// Figure id
        id: &'a str,
        /// Extraction outcome
        status: FigureStatus,
    },
    /// `[FORMULA: <text> :END_FORMULA]`
    Formula(&'a str),
    /// `[FORMULA_BLOCK: <text> :END_FORMULA_BLOCK]`
    FormulaBlock(&'a str),
    /// `[TABLE_START]`
    TableStart,
    /// `[TABLE_ROW:<index>]`
    TableRow(usize),
    /// `[TABLE_CELL: <text>]`
    TableCell(&'a str),
    /// `[TABLE_END]`
    TableEnd,
}

impl fmt::Display for Marker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Figure { id, status } => match status {
                FigureStatus::Extracted => write!(f, "[FIGURE:{}]", id),
                FigureStatus::ExtractionFailed => write!(f, "[FIGURE:{}:extraction_failed]", id),
                FigureStatus::NoXref => write!(f, "[FIGURE:{}:no_xref]", id),
            },
            Marker::Formula(text) => write!(f, "{}{}{}", FORMULA_PREFIX, text, FORMULA_SUFFIX),
            Marker::FormulaBlock(text) => {
                write!(f, "{}{}{}", FORMULA_BLOCK_PREFIX, text, FORMULA_BLOCK_SUFFIX)
            }
            Marker::TableStart => f.write_str(TABLE_START),
            Marker::TableRow(index) => write!(f, "{}{}]", TABLE_ROW_PREFIX, index),
            Marker::TableCell(text) => write!(f, "{} {}]", TABLE_CELL_PREFIX, text),
            Marker::TableEnd => f.write_str(TABLE_END),
        }
    }
}

/// Check if a line is a marker token. Aggregators pass these through.
pub fn is_marker_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(FIGURE_PREFIX)
        || trimmed.starts_with(FORMULA_PREFIX.trim_end())
        || trimmed.starts_with(FORMULA_BLOCK_PREFIX.trim_end())
        || is_table_token(trimmed)
}

fn is_table_token(trimmed: &str) -> bool {
    trimmed == TABLE_START
        || trimmed == TABLE_END
        || trimmed.starts_with(TABLE_ROW_PREFIX)
        || trimmed.starts_with(TABLE_CELL_PREFIX)
}

/// Validate marker pairing in an annotated text stream.
///
/// Table spans must close before the next one opens and may contain only
/// row and cell tokens; row and cell tokens may not appear outside a span;
/// every formula token must carry its terminator.
pub fn validate_markers(text: &str) -> Result<()> {
    let mut open_table: Option<usize> = None;

    for (idx, line) in text.split('\n').enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();

        if trimmed == TABLE_START {
            if let Some(start) = open_table {
                return Err(Error::UnbalancedMarkers(format!(
                    "line {}: {} while the table opened on line {} is still open",
                    line_no, TABLE_START, start
                )));
            }
            open_table = Some(line_no);
        } else if trimmed == TABLE_END {
            if open_table.take().is_none() {
                return Err(Error::UnbalancedMarkers(format!(
                    "line {}: {} without {}",
                    line_no, TABLE_END, TABLE_START
                )));
            }
        } else if trimmed.starts_with(TABLE_ROW_PREFIX) || trimmed.starts_with(TABLE_CELL_PREFIX) {
            if open_table.is_none() {
                return Err(Error::UnbalancedMarkers(format!(
                    "line {}: table token outside a table span",
                    line_no
                )));
            }
            if !trimmed.ends_with(']') {
                return Err(Error::UnbalancedMarkers(format!(
                    "line {}: unterminated table token",
                    line_no
                )));
            }
        } else if let Some(start) = open_table {
            return Err(Error::UnbalancedMarkers(format!(
                "line {}: non-table content inside the table opened on line {}",
                line_no, start
            )));
        } else if trimmed.starts_with(FORMULA_BLOCK_PREFIX.trim_end()) {
            check_formula(trimmed, FORMULA_BLOCK_SUFFIX, line_no)?;
        } else if trimmed.starts_with(FORMULA_PREFIX.trim_end()) {
            check_formula(trimmed, FORMULA_SUFFIX, line_no)?;
        }
    }

    match open_table {
        Some(start) => Err(Error::UnbalancedMarkers(format!(
            "table opened on line {} is never closed",
            start
        ))),
        None => Ok(()),
    }
}

fn check_formula(trimmed: &str, suffix: &str, line_no: usize) -> Result<()> {
    if !trimmed.ends_with(suffix) {
        return Err(Error::UnbalancedMarkers(format!(
            "line {}: formula token without{}",
            line_no, suffix
        )));
    }
    if trimmed.contains(TABLE_ROW_PREFIX) || trimmed.contains(TABLE_CELL_PREFIX) {
        return Err(Error::UnbalancedMarkers(format!(
            "line {}: table token inside a formula",
            line_no
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_display() {
        let figure = |status| Marker::Figure { id: "pdfimg3", status }.to_string();
        assert_eq!(figure(FigureStatus::Extracted), "[FIGURE:pdfimg3]");
        assert_eq!(
            figure(FigureStatus::ExtractionFailed),
            "[FIGURE:pdfimg3:extraction_failed]"
        );
        assert_eq!(figure(FigureStatus::NoXref), "[FIGURE:pdfimg3:no_xref]");

        assert_eq!(Marker::Formula("𝑁 = 10").to_string(), "[FORMULA: 𝑁 = 10 :END_FORMULA]");
        assert_eq!(
            Marker::FormulaBlock("a = b c = d").to_string(),
            "[FORMULA_BLOCK: a = b c = d :END_FORMULA_BLOCK]"
        );
        assert_eq!(Marker::TableStart.to_string(), "[TABLE_START]");
        assert_eq!(Marker::TableRow(0).to_string(), "[TABLE_ROW:0]");
        assert_eq!(Marker::TableCell("92.3").to_string(), "[TABLE_CELL: 92.3]");
        assert_eq!(Marker::TableCell("").to_string(), "[TABLE_CELL: ]");
        assert_eq!(Marker::TableEnd.to_string(), "[TABLE_END]");
    }

    #[test]
    fn test_is_marker_line() {
        assert!(is_marker_line("[FIGURE:pdfimg1]"));
        assert!(is_marker_line("[FORMULA: x = 1 :END_FORMULA]"));
        assert!(is_marker_line("[FORMULA_BLOCK: a b :END_FORMULA_BLOCK]"));
        assert!(is_marker_line("  [TABLE_CELL: ]"));
        assert!(is_marker_line("[TABLE_ROW:2]"));
        assert!(!is_marker_line("[1] Reference entry"));
        assert!(!is_marker_line("plain"));
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let text = "intro\n[TABLE_START]\n[TABLE_ROW:0]\n[TABLE_CELL: a]\n[TABLE_END]\n\
                    [FORMULA: x = 1 :END_FORMULA]\n[FIGURE:pdfimg1:no_xref]";
        assert!(validate_markers(text).is_ok());
    }

    #[test]
    fn test_validate_rejects_unclosed_table() {
        let err = validate_markers("[TABLE_START]\n[TABLE_CELL: a]").unwrap_err();
        assert!(matches!(err, Error::UnbalancedMarkers(_)));
    }

    #[test]
    fn test_validate_rejects_nested_table() {
        assert!(validate_markers("[TABLE_START]\n[TABLE_START]\n[TABLE_END]").is_err());
    }

    #[test]
    fn test_validate_rejects_stray_cell_and_prose_in_table() {
        assert!(validate_markers("[TABLE_CELL: a]").is_err());
        assert!(validate_markers("[TABLE_START]\nprose\n[TABLE_END]").is_err());
        assert!(validate_markers("[TABLE_START]\n[FORMULA: x :END_FORMULA]\n[TABLE_END]").is_err());
    }

    #[test]
    fn test_validate_rejects_unterminated_formula() {
        assert!(validate_markers("[FORMULA: x = 1").is_err());
        assert!(validate_markers("[FORMULA_BLOCK: x = 1 :END_FORMULA]").is_err());
    }
}
