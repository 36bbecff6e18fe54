//! Character sets used by the line classifiers.

/// Operators that mark a line as a formula on a single occurrence.
pub const STRONG_OPERATORS: &[char] = &['∑', '∏', '∫', '∂', '∇', '=', '±', '×', '÷'];

/// Letterlike symbols that stand in for gaps in the math italic block.
const LETTERLIKE_MATH: &[char] = &['ℎ', 'ℝ', 'ℕ', 'ℤ', 'ℚ', 'ℂ'];

/// Check if a character belongs to the mathematical symbol set.
///
/// Covers math italic and bold italic Latin and Greek letters, superscript
/// and subscript digits and signs, big operators, relations and set
/// operators, and `±×÷`. Plain arithmetic signs such as U+2212 MINUS SIGN
/// and mathematical digits are not included.
pub fn is_math_symbol(c: char) -> bool {
    is_math_letter(c)
        || is_script_char(c)
        || is_big_operator(c)
        || is_relation(c)
        || is_set_operator(c)
        || matches!(c, '±' | '×' | '÷')
}

fn is_math_letter(c: char) -> bool {
    matches!(c,
        // italic and bold italic Latin
        '\u{1D434}'..='\u{1D49B}'
        // italic and bold italic Greek
        | '\u{1D6E2}'..='\u{1D755}'
    ) || LETTERLIKE_MATH.contains(&c)
}

fn is_script_char(c: char) -> bool {
    matches!(c, '\u{2070}'..='\u{209F}' | '\u{00B2}' | '\u{00B3}' | '\u{00B9}')
}

fn is_big_operator(c: char) -> bool {
    matches!(c,
        '∏' | '∐' | '∑'
        | '\u{222B}'..='\u{2233}' // ∫ ∬ ∭ ∮ ...
        | '\u{22C0}'..='\u{22C3}' // ⋀ ⋁ ⋂ ⋃
        | '\u{2A00}'..='\u{2A0C}' // ⨀ ... ⨌
    )
}

fn is_relation(c: char) -> bool {
    matches!(c,
        '∝' | '∣' | '∤' | '∥' | '∦'
        | '\u{2236}'..='\u{2237}' // ∶ ∷
        | '\u{223C}'..='\u{2281}' // ∼ ≈ ≠ ≡ ≤ ≥ ≪ ≫ ≺ ≻ ...
        | '\u{22A2}'..='\u{22A5}' // ⊢ ⊣ ⊤ ⊥
        | '\u{22DA}'..='\u{22DB}' // ⋚ ⋛
    )
}

fn is_set_operator(c: char) -> bool {
    matches!(c,
        '∀' | '∃' | '∄' | '∅' | '∖' | '∩' | '∪' | '⊎' | '⊓' | '⊔'
        | '\u{2208}'..='\u{220D}' // ∈ ∉ ∊ ∋ ∌ ∍
        | '\u{2282}'..='\u{228B}' // ⊂ ⊃ ⊄ ⊅ ⊆ ⊇ ⊈ ⊉ ⊊ ⊋
    )
}

/// Count math symbol characters in a line.
pub fn math_symbol_count(line: &str) -> usize {
    line.chars().filter(|c| is_math_symbol(*c)).count()
}

/// Check if a line contains any strong operator.
pub fn has_strong_operator(line: &str) -> bool {
    line.chars().any(|c| STRONG_OPERATORS.contains(&c))
}
