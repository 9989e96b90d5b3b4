//! CJK script detection gate
//!
//! Decides whether a string needs zh→en translation at all. The covered
//! Unicode ranges are the behavioral contract: CJK Unified Ideographs,
//! Extension A, Extension B, and the Compatibility Ideographs block.

/// Returns true if `c` is a CJK ideograph.
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'      // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'    // Extension A
        | '\u{20000}'..='\u{2A6DF}'  // Extension B
        | '\u{F900}'..='\u{FAFF}'    // Compatibility Ideographs
    )
}

/// Returns true if any code point of `text` is a CJK ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Gate for the translation pipeline: translate only when the trimmed
/// input actually contains CJK text. Empty input never needs translation.
pub fn needs_translation(text: &str) -> bool {
    contains_cjk(text.trim())
}
