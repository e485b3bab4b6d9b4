//! Query engine: narrow the code list by macro and free-text search.
//!
//! Filtering never re-sorts. The result is always a subsequence of the
//! input in its original order.
//!
//! # Stages
//!
//! 1. Macro filter: when a macro id is given, keep codes whose `macro_id`
//!    equals it.
//! 2. Search: when the trimmed term is non-empty, keep codes whose
//!    lower-cased `name` or `key` contains the lower-cased term.

use crate::models::{Code, Id};

/// Apply the macro filter, then the search filter.
pub fn filter_codes<'a>(
    codes: &'a [Code],
    macro_id: Option<&Id>,
    search: &str,
) -> Vec<&'a Code> {
    let needle = normalize_search(search);

    let visible: Vec<&Code> = codes
        .iter()
        .filter(|c| match macro_id {
            Some(id) => c.macro_id.as_ref() == Some(id),
            None => true,
        })
        .filter(|c| match &needle {
            Some(needle) => matches_search(c, needle),
            None => true,
        })
        .collect();

    tracing::debug!(
        macro_id = ?macro_id,
        search = needle.as_deref().unwrap_or(""),
        visible = visible.len(),
        total = codes.len(),
        "filtered codes"
    );
    visible
}

/// Trimmed, lower-cased search term; `None` when it imposes no filter.
pub fn normalize_search(search: &str) -> Option<String> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match on `name` OR `key`.
///
/// `needle` must already be normalized with [`normalize_search`].
pub fn matches_search(code: &Code, needle: &str) -> bool {
    code.name.to_lowercase().contains(needle) || code.key.to_lowercase().contains(needle)
}
