//! Code → items index.
//!
//! Built once per dataset in a single pass: items are grouped by `code_id`
//! in arrival order, then each group is stably sorted by [`Item::sort_key`].
//! Items sharing a key (including several with no `order`) keep their
//! authoring order.

use std::collections::HashMap;

use crate::models::{Code, Id, Item};

#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    by_code: HashMap<Id, Vec<Item>>,
    /// Code ids in order of first appearance among the items.
    seen: Vec<Id>,
}

impl ItemIndex {
    pub fn build(items: &[Item]) -> Self {
        let mut by_code: HashMap<Id, Vec<Item>> = HashMap::new();
        let mut seen = Vec::new();
        for item in items {
            let group = by_code.entry(item.code_id.clone()).or_insert_with(|| {
                seen.push(item.code_id.clone());
                Vec::new()
            });
            group.push(item.clone());
        }
        for group in by_code.values_mut() {
            // `sort_by_key` is stable.
            group.sort_by_key(Item::sort_key);
        }
        tracing::debug!(
            codes = by_code.len(),
            items = items.len(),
            "item index built"
        );
        Self { by_code, seen }
    }

    /// Ordered items for a code; empty for ids with no items.
    pub fn items_for(&self, code_id: &Id) -> &[Item] {
        self.by_code.get(code_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct code ids that have at least one item.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Items whose `code_id` matches none of `codes`. These are never shown.
    ///
    /// Grouped by code in order of first appearance in the dataset, each
    /// group in display order.
    pub fn orphans<'a>(&'a self, codes: &[Code]) -> Vec<&'a Item> {
        self.seen
            .iter()
            .filter(|id| !codes.iter().any(|c| &c.id == *id))
            .flat_map(|id| self.items_for(id))
            .collect()
    }
}
