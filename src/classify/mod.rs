//! Line classification policies.
//!
//! Pure predicates over a single line of text. Each classifier is a
//! strategy object holding an ordered list of named rules, so heuristics
//! can be tuned or extended without touching the aggregators.

mod formula;
mod rules;
mod symbols;
mod table_cell;

pub use formula::{is_formula_line, FormulaClassifier, CONTINUATION_PREFIX};
pub use rules::{run_chain, Decision, GuardRule, LineRule};
pub use symbols::{has_strong_operator, is_math_symbol, math_symbol_count, STRONG_OPERATORS};
pub use table_cell::{is_table_cell_candidate, TableCellClassifier};
