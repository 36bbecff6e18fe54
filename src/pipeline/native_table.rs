//! Serialization of natively detected tables into table markers.

use crate::annotate::Marker;
use crate::model::{TableCandidate, TableRecord};

/// Formats native tables as `[TABLE_START]` / row / cell / `[TABLE_END]`
/// marker lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTableFormatter;

impl NativeTableFormatter {
    /// Create a formatter.
    pub fn new() -> Self {
        Self
    }

    /// Filter candidates into records ordered by their top edge.
    pub fn accept(&self, candidates: Vec<TableCandidate>) -> Vec<TableRecord> {
        let total = candidates.len();
        let mut records: Vec<TableRecord> = candidates
            .into_iter()
            .filter_map(TableRecord::from_candidate)
            .collect();
        if records.len() < total {
            log::debug!(
                "native tables: {} of {} candidates discarded",
                total - records.len(),
                total
            );
        }

        records.sort_by(|a, b| a.bbox.top().total_cmp(&b.bbox.top()));
        records
    }

    /// Marker lines for one table.
    pub fn format(&self, table: &TableRecord) -> Vec<String> {
        let cells: usize = table.rows.iter().map(Vec::len).sum();
        let mut lines = Vec::with_capacity(2 + table.rows.len() + cells);

        lines.push(Marker::TableStart.to_string());
        for (index, row) in table.rows.iter().enumerate() {
            lines.push(Marker::TableRow(index).to_string());
            lines.extend(
                row.iter()
                    .map(|cell| Marker::TableCell(&clean_cell(cell)).to_string()),
            );
        }
        lines.push(Marker::TableEnd.to_string());

        lines
    }
}

/// Cell text on one line: newlines become spaces, ends trimmed.
fn clean_cell(cell: &str) -> String {
    cell.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn record(rows: Vec<Vec<&str>>) -> TableRecord {
        TableRecord::from_candidate(TableCandidate::from_strings(BBox::default(), rows)).unwrap()
    }

    #[test]
    fn test_format_rows_and_cells() {
        let table = record(vec![vec!["Model", "Acc"], vec!["Ours\nlarge", ""]]);
        let lines = NativeTableFormatter::new().format(&table);
        assert_eq!(
            lines,
            vec![
                "[TABLE_START]",
                "[TABLE_ROW:0]",
                "[TABLE_CELL: Model]",
                "[TABLE_CELL: Acc]",
                "[TABLE_ROW:1]",
                "[TABLE_CELL: Ours large]",
                "[TABLE_CELL: ]",
                "[TABLE_END]",
            ]
        );
    }

    #[test]
    fn test_accept_orders_by_top_edge() {
        let low = TableCandidate::from_strings(BBox::new(0.0, 400.0, 10.0, 500.0), [["a"], ["b"]]);
        let high = TableCandidate::from_strings(BBox::new(0.0, 100.0, 10.0, 200.0), [["c"], ["d"]]);
        let thin = TableCandidate::from_strings(BBox::new(0.0, 50.0, 10.0, 60.0), [["only"]]);

        let records = NativeTableFormatter::new().accept(vec![low, high, thin]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rows[0][0], "c");
        assert_eq!(records[1].rows[0][0], "a");
    }
}
