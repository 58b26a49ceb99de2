//! Keyword occurrence counting.

use crate::models::CaseMode;

/// Count non-overlapping occurrences of `needle` in `haystack`.
///
/// Partial-word matches count: "sale" is found twice in "salesale".
pub fn count_occurrences(haystack: &str, needle: &str, case: CaseMode) -> u64 {
    let count = match case {
        CaseMode::Sensitive => haystack.matches(needle).count(),
        CaseMode::Insensitive => haystack
            .to_lowercase()
            .matches(needle.to_lowercase().as_str())
            .count(),
    };
    count as u64
}
