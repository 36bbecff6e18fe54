//! Formula line classification.

use std::sync::OnceLock;

use regex::Regex;

use super::rules::LineRule;
use super::symbols::{has_strong_operator, is_math_symbol, math_symbol_count};

/// Connective that opens a "where ..." clause after an equation.
pub const CONTINUATION_PREFIX: &str = "其中";

/// Decides whether a line of text carries mathematical notation.
///
/// A line is a formula line when any rule matches. Blank lines never are.
#[derive(Debug)]
pub struct FormulaClassifier {
    rules: Vec<LineRule>,
    /// Minimum math symbol count for the density rule
    pub min_symbol_count: usize,
    /// Maximum trimmed length (chars) for the short math rule
    pub short_line_chars: usize,
}

impl FormulaClassifier {
    /// Create a classifier with the default rule set.
    pub fn new() -> Self {
        Self::with_thresholds(2, 10)
    }

    /// Create a classifier with custom density and short-line thresholds.
    pub fn with_thresholds(min_symbol_count: usize, short_line_chars: usize) -> Self {
        let equation_start = Regex::new(r"^\s*[A-Za-z\x{1D400}-\x{1D6A5}\x{210E}]\s*=").unwrap();
        let index_assignment =
            Regex::new(r"^\s*[ijk\x{1D456}\x{1D457}\x{1D458}]\s*=\s*\d").unwrap();

        let rules = vec![
            LineRule::new("symbol_density", move |line| {
                math_symbol_count(line) >= min_symbol_count
            }),
            LineRule::new("strong_operator", has_strong_operator),
            LineRule::new("short_math", move |line| {
                let trimmed = line.trim();
                trimmed.chars().count() <= short_line_chars && math_symbol_count(trimmed) >= 1
            }),
            LineRule::new("equation_start", move |line| equation_start.is_match(line)),
            LineRule::new("index_assignment", move |line| {
                index_assignment.is_match(line)
            }),
        ];

        Self {
            rules,
            min_symbol_count,
            short_line_chars,
        }
    }

    /// Append a rule; it is consulted after the existing ones.
    pub fn with_rule(mut self, rule: LineRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Names of the active rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(LineRule::name).collect()
    }

    /// Name of the first rule that matches the line.
    pub fn matched_rule(&self, line: &str) -> Option<&'static str> {
        if line.trim().is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(line))
            .map(LineRule::name)
    }

    /// Check if a line is a formula line.
    pub fn is_formula_line(&self, line: &str) -> bool {
        self.matched_rule(line).is_some()
    }

    /// Check if a line continues a formula block ("其中 ..." with math).
    pub fn is_continuation_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.starts_with(CONTINUATION_PREFIX) && trimmed.chars().any(is_math_symbol)
    }
}

impl Default for FormulaClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn default_classifier() -> &'static FormulaClassifier {
    static CLASSIFIER: OnceLock<FormulaClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(FormulaClassifier::new)
}

/// Check if a line is a formula line using the default rules.
pub fn is_formula_line(line: &str) -> bool {
    default_classifier().is_formula_line(line)
}
