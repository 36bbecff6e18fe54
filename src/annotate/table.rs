//! Heuristic table detection over the text stream.
//!
//! Tables whose cells the layout parser flattened into one line each (or
//! into space-separated rows) are recognized by shape: runs of short,
//! cell-like lines and rows with numeric columns. The pass is permissive and
//! prefers a false table over silently dropping tabular data.

use crate::classify::TableCellClassifier;

use super::markers::{is_marker_line, Marker};
use super::AnnotationStats;

/// Acceptance thresholds for buffered table candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeuristicConfig {
    /// Minimum buffered lines for a table to be emitted
    pub min_lines: usize,
    /// Buffer length accepted without numeric evidence (`None` always
    /// requires a numeric line)
    pub sequence_min_lines: Option<usize>,
    /// Lines longer than this (chars) are never cells
    pub max_cell_chars: usize,
}

impl TableHeuristicConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require numeric evidence for every heuristic table.
    pub fn strict(mut self) -> Self {
        self.sequence_min_lines = None;
        self
    }

    /// Set the minimum number of lines.
    pub fn with_min_lines(mut self, lines: usize) -> Self {
        self.min_lines = lines.max(2);
        self
    }

    /// Set the buffer length that is accepted without numeric evidence.
    pub fn with_sequence_min_lines(mut self, lines: Option<usize>) -> Self {
        self.sequence_min_lines = lines;
        self
    }
}

impl Default for TableHeuristicConfig {
    fn default() -> Self {
        Self {
            min_lines: 2,
            sequence_min_lines: Some(4),
            max_cell_chars: 100,
        }
    }
}

/// Buffers table-like lines and flushes them as table markers.
#[derive(Debug)]
pub struct TableAggregator {
    classifier: TableCellClassifier,
    config: TableHeuristicConfig,
}

impl TableAggregator {
    /// Create an aggregator with default thresholds.
    pub fn new() -> Self {
        Self::with_config(TableHeuristicConfig::default())
    }

    /// Create an aggregator with custom thresholds.
    pub fn with_config(config: TableHeuristicConfig) -> Self {
        Self {
            classifier: TableCellClassifier::with_max_chars(config.max_cell_chars),
            config,
        }
    }

    /// Replace the cell classifier.
    pub fn with_classifier(mut self, classifier: TableCellClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &TableHeuristicConfig {
        &self.config
    }

    /// Annotate tables in `text`.
    pub fn annotate(&self, text: &str) -> String {
        self.annotate_with_stats(text, &mut AnnotationStats::default())
    }

    /// Annotate tables in `text`, counting emitted tables into `stats`.
    pub fn annotate_with_stats(&self, text: &str, stats: &mut AnnotationStats) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut buffer = TableBuffer::default();
        let mut out: Vec<String> = Vec::with_capacity(lines.len());

        for (i, &line) in lines.iter().enumerate() {
            if is_marker_line(line) {
                self.flush(&mut buffer, &mut out, stats);
                out.push(line.to_string());
                continue;
            }

            let multi_col_row = self.classifier.is_multi_column_row(line);
            let single_cell = self.classifier.is_table_cell_candidate(line);

            if multi_col_row || (single_cell && buffer.in_table()) {
                buffer.push(line);
            } else if single_cell && self.next_is_cell(lines.get(i + 1).copied()) {
                log::debug!("table seeded by look-ahead at line {}", i + 1);
                buffer.push(line);
            } else {
                self.flush(&mut buffer, &mut out, stats);
                out.push(line.to_string());
            }
        }
        self.flush(&mut buffer, &mut out, stats);

        out.join("\n")
    }

    fn next_is_cell(&self, next: Option<&str>) -> bool {
        next.is_some_and(|l| !is_marker_line(l) && self.classifier.is_table_cell_candidate(l))
    }

    /// Check buffered lines for table evidence: a numeric line, or enough
    /// lines to pass as a sequence on their own.
    pub fn looks_like_table_sequence(&self, lines: &[&str]) -> bool {
        lines.iter().any(|l| self.classifier.is_numeric_line(l))
            || self
                .config
                .sequence_min_lines
                .is_some_and(|min| lines.len() >= min)
    }

    fn flush(
        &self,
        buffer: &mut TableBuffer<'_>,
        out: &mut Vec<String>,
        stats: &mut AnnotationStats,
    ) {
        if !buffer.in_table() {
            return;
        }

        let lines = buffer.take();
        if lines.len() >= self.config.min_lines && self.looks_like_table_sequence(&lines) {
            log::debug!("heuristic table accepted: {} lines", lines.len());
            out.push(Marker::TableStart.to_string());
            out.extend(lines.iter().map(|l| Marker::TableCell(l.trim()).to_string()));
            out.push(Marker::TableEnd.to_string());
            stats.tables += 1;
        } else {
            log::debug!("heuristic table rejected: {} lines", lines.len());
            out.extend(lines.iter().map(|l| l.to_string()));
            stats.rejected_table_candidates += 1;
        }
    }
}

impl Default for TableAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines buffered while in table mode. Table mode lasts exactly as long as
/// the buffer holds lines.
#[derive(Debug, Default)]
struct TableBuffer<'a> {
    lines: Vec<&'a str>,
}

impl<'a> TableBuffer<'a> {
    fn push(&mut self, line: &'a str) {
        self.lines.push(line);
    }

    fn in_table(&self) -> bool {
        !self.lines.is_empty()
    }

    fn take(&mut self) -> Vec<&'a str> {
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate(text: &str) -> String {
        TableAggregator::new().annotate(text)
    }

    const PROSE: &str = "The results above confirm that the proposed approach generalizes well.";

    #[test]
    fn test_cells_with_numeric_evidence() {
        let text = format!("CIFAR-10\n92.3\nImageNet\n{}", PROSE);
        assert_eq!(
            annotate(&text),
            format!(
                "[TABLE_START]\n[TABLE_CELL: CIFAR-10]\n[TABLE_CELL: 92.3]\n\
                 [TABLE_CELL: ImageNet]\n[TABLE_END]\n{}",
                PROSE
            )
        );
    }

    #[test]
    fn test_single_line_never_table() {
        let text = format!("{}\n92.3\n{}", PROSE, PROSE);
        assert_eq!(annotate(&text), text);

        let text = format!("{}\nResNet 76.1 93.0\n{}", PROSE, PROSE);
        assert_eq!(annotate(&text), text);
    }

    #[test]
    fn test_short_labels_without_numbers_rejected() {
        let text = format!("Method\nBaseline\nOurs\n{}", PROSE);
        assert_eq!(annotate(&text), text);
    }

    #[test]
    fn test_four_labels_accepted_without_numbers() {
        let text = format!("Method\nBaseline\nOurs\nAblation\n{}", PROSE);
        let out = annotate(&text);
        assert!(out.starts_with("[TABLE_START]\n[TABLE_CELL: Method]"));
        assert_eq!(out.matches("[TABLE_CELL:").count(), 4);
    }

    #[test]
    fn test_strict_config_requires_numbers() {
        let aggregator = TableAggregator::with_config(TableHeuristicConfig::new().strict());
        let text = format!("Method\nBaseline\nOurs\nAblation\n{}", PROSE);
        assert_eq!(aggregator.annotate(&text), text);
    }

    #[test]
    fn test_min_lines_config() {
        let text = format!("{}\nAccuracy\n92.3\n{}", PROSE, PROSE);

        let three = TableAggregator::with_config(TableHeuristicConfig::new().with_min_lines(3));
        assert_eq!(three.annotate(&text), text);

        let clamped = TableHeuristicConfig::new().with_min_lines(1);
        assert_eq!(clamped.min_lines, 2);
        assert!(TableAggregator::with_config(clamped)
            .annotate(&text)
            .contains("[TABLE_START]\n[TABLE_CELL: Accuracy]\n[TABLE_CELL: 92.3]\n[TABLE_END]"));
    }

    #[test]
    fn test_multi_column_rows() {
        let text = format!("{}\nResNet-50 76.1 93.0\nViT-B 81.8 95.6\n88.4\n{}", PROSE, PROSE);
        let out = annotate(&text);
        assert!(out.contains("[TABLE_CELL: ResNet-50 76.1 93.0]"));
        assert!(out.contains("[TABLE_CELL: 88.4]"));
        assert!(out.ends_with(&format!("[TABLE_END]\n{}", PROSE)));
    }

    #[test]
    fn test_flush_at_end_of_stream() {
        let out = annotate("Accuracy\n92.3\n88.1");
        assert_eq!(
            out,
            "[TABLE_START]\n[TABLE_CELL: Accuracy]\n[TABLE_CELL: 92.3]\n\
             [TABLE_CELL: 88.1]\n[TABLE_END]"
        );
    }

    #[test]
    fn test_marker_lines_break_buffer() {
        let text = "92.3\n[FORMULA: 𝑥 = 1 :END_FORMULA]\n88.1";
        assert_eq!(annotate(text), text);
    }

    #[test]
    fn test_idempotent() {
        let text = format!("CIFAR-10\n92.3\nImageNet\n{}\nMethod\nOurs\n{}", PROSE, PROSE);
        let once = annotate(&text);
        assert_eq!(annotate(&once), once);
    }

    #[test]
    fn test_looks_like_table_sequence() {
        let aggregator = TableAggregator::new();
        assert!(aggregator.looks_like_table_sequence(&["Name", "12"]));
        assert!(aggregator.looks_like_table_sequence(&["a", "b", "c", "d"]));
        assert!(!aggregator.looks_like_table_sequence(&["a", "b", "c"]));
    }

    #[test]
    fn test_stats_count_rejections() {
        let mut stats = AnnotationStats::default();
        let text = format!("Method\nOurs\n{}\nCIFAR-10\n92.3\n{}", PROSE, PROSE);
        TableAggregator::new().annotate_with_stats(&text, &mut stats);
        assert_eq!(stats.tables, 1);
        assert_eq!(stats.rejected_table_candidates, 1);
    }
}
