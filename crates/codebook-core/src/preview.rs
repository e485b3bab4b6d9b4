//! Card previews: first definition and first border rule of a code,
//! truncated to a character budget.

use crate::models::{Item, ItemKind};

/// Appended to text cut by [`truncate`].
pub const ELLIPSIS: char = '…';

/// Shown when a code has no usable definition.
pub const NO_DEFINITION: &str = "No definition loaded.";

pub const DEFAULT_BUDGET: usize = 220;
pub const DEFINITION_BUDGET: usize = 180;
pub const RULE_BUDGET: usize = 140;

/// Cut `text` to exactly `budget` characters and append [`ELLIPSIS`].
///
/// Text at or under the budget is returned unchanged. Counting is by
/// Unicode scalar value and ignores word boundaries.
pub fn truncate(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&text[..cut]);
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// First item of `kind`, in display order.
pub fn first_of_kind(items: &[Item], kind: ItemKind) -> Option<&Item> {
    items.iter().find(|i| i.kind == kind)
}

/// Truncated text of the first definition, or [`NO_DEFINITION`].
///
/// Only the first definition is considered; if its text is empty the
/// placeholder is used even when later definitions have text.
pub fn definition_preview(items: &[Item], budget: usize) -> String {
    match first_of_kind(items, ItemKind::Definition) {
        Some(item) if !item.text.is_empty() => truncate(&item.text, budget),
        _ => truncate(NO_DEFINITION, budget),
    }
}

/// Truncated text of the first border rule, if it has any text.
pub fn rule_preview(items: &[Item], budget: usize) -> Option<String> {
    first_of_kind(items, ItemKind::BorderRule)
        .filter(|item| !item.text.is_empty())
        .map(|item| truncate(&item.text, budget))
}
