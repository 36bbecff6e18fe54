//! Formula aggregation pass.
//!
//! Walks the text stream line by line and folds runs of contiguous formula
//! lines into a single marker. A "其中 ..." clause that still carries math
//! symbols extends the run it follows.

use crate::classify::FormulaClassifier;

use super::markers::{is_marker_line, Marker};
use super::AnnotationStats;

/// Buffers contiguous formula lines and flushes them as markers.
#[derive(Debug, Default)]
pub struct FormulaAggregator {
    classifier: FormulaClassifier,
}

impl FormulaAggregator {
    /// Create an aggregator with the default classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with a custom classifier.
    pub fn with_classifier(classifier: FormulaClassifier) -> Self {
        Self { classifier }
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &FormulaClassifier {
        &self.classifier
    }

    /// Annotate formulas in `text`.
    pub fn annotate(&self, text: &str) -> String {
        self.annotate_with_stats(text, &mut AnnotationStats::default())
    }

    /// Annotate formulas in `text`, counting emitted markers into `stats`.
    pub fn annotate_with_stats(&self, text: &str, stats: &mut AnnotationStats) -> String {
        let mut buffer = FormulaBuffer::default();
        let mut out: Vec<String> = Vec::new();

        for line in text.split('\n') {
            if is_marker_line(line) {
                buffer.flush_into(&mut out, stats);
                out.push(line.to_string());
                continue;
            }

            if self.classifier.is_formula_line(line) {
                buffer.push(line);
            } else if buffer.is_accumulating() && self.classifier.is_continuation_line(line) {
                log::debug!("formula continuation: {:?}", line);
                buffer.push(line);
            } else {
                buffer.flush_into(&mut out, stats);
                out.push(line.to_string());
            }
        }
        buffer.flush_into(&mut out, stats);

        out.join("\n")
    }
}

/// Lines of the formula currently being accumulated.
#[derive(Debug, Default)]
struct FormulaBuffer<'a> {
    lines: Vec<&'a str>,
}

impl<'a> FormulaBuffer<'a> {
    fn push(&mut self, line: &'a str) {
        self.lines.push(line);
    }

    fn is_accumulating(&self) -> bool {
        !self.lines.is_empty()
    }

    fn flush_into(&mut self, out: &mut Vec<String>, stats: &mut AnnotationStats) {
        match self.lines.as_slice() {
            [] => return,
            [single] => {
                out.push(Marker::Formula(single.trim()).to_string());
                stats.formulas += 1;
            }
            lines => {
                let joined = lines
                    .iter()
                    .map(|l| l.trim())
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                log::debug!("formula block of {} lines", lines.len());
                out.push(Marker::FormulaBlock(&joined).to_string());
                stats.formula_blocks += 1;
            }
        }
        self.lines.clear();
    }
}
