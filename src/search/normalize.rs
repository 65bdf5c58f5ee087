//! Text normalization for accent- and case-insensitive comparison.
//!
//! Used on both sides of a free-text match: stored field values at
//! comparison time and the live search term.
//!
//! ```
//! use catalog_search::search::normalize::normalize;
//!
//! assert_eq!(normalize("  Área "), "area");
//! assert_eq!(normalize("Ciências"), normalize("CIENCIAS"));
//! ```

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize `text`: lowercase, decompose (NFD), drop combining marks,
/// trim surrounding whitespace.
///
/// Lowercasing happens before decomposition so that characters whose
/// lowercase form carries a combining mark (`İ` → `i̇`) lose it too, which
/// keeps the function idempotent.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.trim().to_string()
}

/// True when `normalize(haystack)` contains `needle`.
///
/// `needle` must already be normalized.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || normalize(haystack).contains(needle)
}
