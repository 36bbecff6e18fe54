//! Native table candidates and accepted table records.

use super::BBox;
use serde::{Deserialize, Serialize};

/// A raw grid from the native table detector.
///
/// Cells are `None` where the detector found no text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCandidate {
    /// Table region on the page
    pub bbox: BBox,

    /// Rows of cells in reading order
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

impl TableCandidate {
    /// Create a candidate from a grid.
    pub fn new(bbox: BBox, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { bbox, rows }
    }

    /// Create a candidate from plain strings, treating "" as an empty cell.
    pub fn from_strings<R, S>(bbox: BBox, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let cell = cell.into();
                        if cell.is_empty() {
                            None
                        } else {
                            Some(cell)
                        }
                    })
                    .collect()
            })
            .collect();
        Self { bbox, rows }
    }
}

/// A native table accepted for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Table region on the page
    pub bbox: BBox,

    /// Rows of cell text; empty cells are empty strings
    pub rows: Vec<Vec<String>>,

    /// Widest row in cells
    pub col_count: usize,
}

impl TableRecord {
    /// Minimum number of non-empty rows for a candidate to be kept.
    pub const MIN_ROWS: usize = 2;

    /// Build a record from a candidate.
    ///
    /// Rows without any non-empty cell are dropped. Returns `None` when
    /// fewer than [`TableRecord::MIN_ROWS`] rows survive.
    pub fn from_candidate(candidate: TableCandidate) -> Option<Self> {
        let rows: Vec<Vec<String>> = candidate
            .rows
            .into_iter()
            .filter(|row| {
                row.iter()
                    .any(|cell| cell.as_deref().is_some_and(|c| !c.trim().is_empty()))
            })
            .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
            .collect();

        if rows.len() < Self::MIN_ROWS {
            return None;
        }

        let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        Some(Self {
            bbox: candidate.bbox,
            rows,
            col_count,
        })
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rows_dropped() {
        let candidate = TableCandidate::new(
            BBox::default(),
            vec![
                vec![Some("Name".into()), Some("Age".into())],
                vec![None, Some("  ".into())],
                vec![Some("Alice".into()), None],
            ],
        );
        let record = TableRecord::from_candidate(candidate).unwrap();
        assert_eq!(record.row_count(), 2);
        assert_eq!(record.rows[1], vec!["Alice".to_string(), String::new()]);
        assert_eq!(record.col_count, 2);
    }

    #[test]
    fn test_single_row_discarded() {
        let candidate =
            TableCandidate::from_strings(BBox::default(), [vec!["only", "row"], vec!["", ""]]);
        assert!(TableRecord::from_candidate(candidate).is_none());
    }

    #[test]
    fn test_col_count_is_widest_row() {
        let candidate =
            TableCandidate::from_strings(BBox::default(), [vec!["a"], vec!["b", "c", "d"]]);
        let record = TableRecord::from_candidate(candidate).unwrap();
        assert_eq!(record.col_count, 3);
    }
}
