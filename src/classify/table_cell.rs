//! Table cell line classification.
//!
//! A table cell candidate is a short line that could plausibly be a single
//! cell of a table whose cells were flattened one per line: numbers,
//! identifiers, short labels. Headings and list items are excluded up
//! front so that outlines are not mistaken for tables.

use std::sync::OnceLock;

use regex::Regex;

use super::rules::{run_chain, GuardRule};

/// Sentence-final marks that disqualify a short label.
const SENTENCE_FINAL: &[char] = &['。', '：', '；'];

/// Classifies lines as table cell candidates with an ordered guard chain.
#[derive(Debug)]
pub struct TableCellClassifier {
    guards: Vec<GuardRule>,
    numeric: Regex,
    decimal_token: Regex,
}

impl TableCellClassifier {
    /// Create a classifier with the default guard chain.
    pub fn new() -> Self {
        Self::with_max_chars(100)
    }

    /// Create a classifier that rejects lines longer than `max_chars`.
    pub fn with_max_chars(max_chars: usize) -> Self {
        let section_heading = Regex::new(r"^\d+\.\d+\s+.+").unwrap();
        let list_item = Regex::new(r"^\d+[.、]\s+.{5,}").unwrap();
        let numeric = Regex::new(r"^[0-9,.\-+%\x{2212}]+$").unwrap();
        let identifier = Regex::new(r"^[A-Za-z][\w\-]+$").unwrap();
        let english_phrase = Regex::new(r"^[A-Za-z][A-Za-z\s\-]{0,40}$").unwrap();
        let chinese_run = Regex::new(r"^\p{Han}{1,20}$").unwrap();
        let percentage = Regex::new(r"^\d+(?:\.\d+)?%$").unwrap();
        let numeric_guard = numeric.clone();

        let guards = vec![
            GuardRule::reject_if("empty_or_long", move |line| {
                line.is_empty() || line.chars().count() > max_chars
            }),
            GuardRule::reject_if("section_heading", move |line| {
                section_heading.is_match(line) || line.starts_with('第')
            }),
            GuardRule::reject_if("list_item", move |line| {
                list_item.is_match(line) || line.starts_with('•') || line.starts_with('–')
            }),
            GuardRule::accept_if("numeric", move |line| numeric_guard.is_match(line)),
            GuardRule::accept_if("identifier", move |line| {
                line.chars().count() <= 15 && identifier.is_match(line)
            }),
            GuardRule::accept_if("short_label", |line| {
                line.chars().count() <= 10 && !line.ends_with(SENTENCE_FINAL)
            }),
            GuardRule::accept_if("english_phrase", move |line| {
                english_phrase.is_match(line)
            }),
            GuardRule::accept_if("chinese_run", move |line| chinese_run.is_match(line)),
            GuardRule::accept_if("percentage", move |line| percentage.is_match(line)),
        ];

        Self {
            guards,
            numeric,
            decimal_token: Regex::new(r"^\d+(?:\.\d+)?$").unwrap(),
        }
    }

    /// Insert a guard ahead of the accept rules, after the exclusions.
    pub fn with_guard(mut self, guard: GuardRule) -> Self {
        let at = self.guards.len().min(3);
        self.guards.insert(at, guard);
        self
    }

    /// Names of the active guards, in evaluation order.
    pub fn guard_names(&self) -> Vec<&'static str> {
        self.guards.iter().map(GuardRule::name).collect()
    }

    /// Verdict for a line and the name of the guard that decided it.
    pub fn matched_guard(&self, line: &str) -> (bool, Option<&'static str>) {
        run_chain(&self.guards, line.trim())
    }

    /// Check if a line could be a single table cell.
    pub fn is_table_cell_candidate(&self, line: &str) -> bool {
        let (accepted, guard) = self.matched_guard(line);
        log::trace!("table cell {:?}: {} via {:?}", line, accepted, guard);
        accepted
    }

    /// Check if a line is numeric data (digits with separators or a sign,
    /// including the typeset minus U+2212).
    pub fn is_numeric_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        self.numeric.is_match(trimmed) && trimmed.chars().any(|c| c.is_ascii_digit())
    }

    /// Check if a line looks like a row of space-separated columns.
    ///
    /// Requires at least three tokens, one of them a plain decimal number.
    pub fn is_multi_column_row(&self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        tokens.len() >= 3 && tokens.iter().any(|t| self.decimal_token.is_match(t))
    }
}

impl Default for TableCellClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn default_classifier() -> &'static TableCellClassifier {
    static CLASSIFIER: OnceLock<TableCellClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(TableCellClassifier::new)
}

/// Check if a line could be a single table cell using the default guards.
pub fn is_table_cell_candidate(line: &str) -> bool {
    default_classifier().is_table_cell_candidate(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_long() {
        assert!(!is_table_cell_candidate(""));
        assert!(!is_table_cell_candidate("   "));
        assert!(!is_table_cell_candidate(&"a".repeat(101)));
    }

    #[test]
    fn test_rejects_headings_and_lists() {
        assert!(!is_table_cell_candidate("3.2 实验设置"));
        assert!(!is_table_cell_candidate("第三章"));
        assert!(!is_table_cell_candidate("1. Introduction to the method"));
        assert!(!is_table_cell_candidate("2、 数据集的构建方法"));
        assert!(!is_table_cell_candidate("• item"));
        assert!(!is_table_cell_candidate("– dash item"));
    }

    #[test]
    fn test_accepts_cell_shapes() {
        assert!(is_table_cell_candidate("92.3"));
        assert!(is_table_cell_candidate("1,024"));
        assert!(is_table_cell_candidate("+3.5%"));
        assert!(is_table_cell_candidate("CIFAR-10"));
        assert!(is_table_cell_candidate("ImageNet"));
        assert!(is_table_cell_candidate("Mean Average Precision"));
        assert!(is_table_cell_candidate("准确率"));
        assert!(is_table_cell_candidate("Ours"));
    }

    #[test]
    fn test_chinese_run_up_to_twenty_chars() {
        let classifier = TableCellClassifier::new();

        // 15 characters, past the short label limit
        assert_eq!(
            classifier.matched_guard("基于注意力机制的特征融合方法论"),
            (true, Some("chinese_run"))
        );
        // 20 characters
        assert_eq!(
            classifier.matched_guard("基于注意力机制的特征融合方法在多个数据集"),
            (true, Some("chinese_run"))
        );
        // 21 characters
        assert_eq!(
            classifier.matched_guard("基于注意力机制的特征融合方法在多个数据集上"),
            (false, None)
        );
        // sentence-final mark breaks the run
        assert_eq!(
            classifier.matched_guard("本文提出一种新的特征融合方法。"),
            (false, None)
        );
    }

    #[test]
    fn test_rejects_prose() {
        assert!(!is_table_cell_candidate(
            "The proposed method improves accuracy on all benchmarks."
        ));
        assert!(!is_table_cell_candidate("实验结果表明本文方法在所有数据集上均取得了最优的性能。"));
        assert!(!is_table_cell_candidate("如下所示："));
    }

    #[test]
    fn test_numeric_line_needs_a_digit() {
        let classifier = TableCellClassifier::new();
        assert!(classifier.is_numeric_line("92.3"));
        assert!(classifier.is_numeric_line(" 45% "));
        assert!(classifier.is_numeric_line("−0.5"));
        assert!(!classifier.is_numeric_line("---"));
        assert!(!classifier.is_numeric_line("CIFAR-10"));
    }

    #[test]
    fn test_multi_column_row() {
        let classifier = TableCellClassifier::new();
        assert!(classifier.is_multi_column_row("ResNet-50 76.1 93.0"));
        assert!(classifier.is_multi_column_row("Model A 12"));
        assert!(!classifier.is_multi_column_row("76.1 93.0"));
        assert!(!classifier.is_multi_column_row("three plain words"));
    }

    #[test]
    fn test_custom_guard_runs_before_accepts() {
        let classifier = TableCellClassifier::new()
            .with_guard(GuardRule::reject_if("figure_caption", |l| l.starts_with("Fig")));
        assert!(!classifier.is_table_cell_candidate("Fig"));
        assert_eq!(classifier.guard_names()[3], "figure_caption");
    }
}
