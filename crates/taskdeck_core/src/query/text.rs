//! Search-text folding.
//!
//! # Responsibility
//! - Fold case and diacritics so Vietnamese input matches with or without
//!   tone marks.
//!
//! # Invariants
//! - Folding is idempotent: folding already-folded text is a no-op.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds `value` for diacritic- and case-insensitive comparison.
///
/// NFD-decomposes, drops the combining marks, maps the stroked d letters
/// (which have no decomposition) to plain d, then lowercases. "Đi học"
/// folds to "di hoc".
pub fn fold_search_text(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(fold_stroked_d)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns whether `haystack` contains `needle` once both sides are folded.
///
/// An empty or whitespace-only needle matches everything.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = fold_search_text(needle.trim());
    if needle.is_empty() {
        return true;
    }
    fold_search_text(haystack).contains(&needle)
}

/// Maps đ/Đ (U+0111/U+0110) and the lookalike eth ð/Ð (U+00F0/U+00D0)
/// to plain d/D. None of the four decompose under NFD.
fn fold_stroked_d(ch: char) -> char {
    match ch {
        'đ' | 'ð' => 'd',
        'Đ' | 'Ð' => 'D',
        other => other,
    }
}
