//! Text normalization shared by the parser and the repository.

use std::cmp::Ordering;

/// Canonical form of a command keyword (`help`, `delete`, ...): trimmed and lower-cased.
pub fn normalize_keyword(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Canonical storage key of an acronym: trimmed and upper-cased.
/// `Test`, `TEST` and ` test ` all map to `TEST`.
pub fn normalize_acronym(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Case-insensitive alphabetical order, falling back to the exact text so the order is total.
pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
