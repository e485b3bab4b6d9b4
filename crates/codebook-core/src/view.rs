//! Browsing model: an indexed codebook plus the selection state a front end
//! drives it with.
//!
//! [`Codebook`] is built once per load and never mutated. [`ViewState`] is
//! the only thing that changes while browsing; every derived list is
//! recomputed from it on demand.

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, DatasetError};
use crate::index::ItemIndex;
use crate::models::{Code, Id, Item, ItemKind, Macro};
use crate::preview::{self, DEFINITION_BUDGET, RULE_BUDGET};
use crate::query;

/// Heading when no macro is selected.
pub const DEFAULT_TITLE: &str = "Codebook Explorer";
/// Heading when the selected macro id resolves to nothing.
pub const MACRO_NOT_FOUND: &str = "Macro not found";
/// Macro name shown for a code whose macro does not resolve.
pub const UNKNOWN_MACRO: &str = "—";

/// Character budgets for card previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewBudget {
    pub definition: usize,
    pub rule: usize,
}

impl Default for PreviewBudget {
    fn default() -> Self {
        Self {
            definition: DEFINITION_BUDGET,
            rule: RULE_BUDGET,
        }
    }
}

/// A dataset together with its item index.
#[derive(Debug, Clone)]
pub struct Codebook {
    dataset: Dataset,
    index: ItemIndex,
}

impl Codebook {
    /// Index a dataset, refusing one with nothing to browse.
    pub fn new(dataset: Dataset) -> Result<Self, DatasetError> {
        dataset.check()?;
        let index = ItemIndex::build(&dataset.items);
        Ok(Self { dataset, index })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn macros(&self) -> &[Macro] {
        &self.dataset.macros
    }

    pub fn codes(&self) -> &[Code] {
        &self.dataset.codes
    }

    pub fn items_for(&self, code_id: &Id) -> &[Item] {
        self.index.items_for(code_id)
    }

    /// Number of codes under a macro.
    pub fn code_count(&self, macro_id: &Id) -> usize {
        self.dataset
            .codes
            .iter()
            .filter(|c| c.macro_id.as_ref() == Some(macro_id))
            .count()
    }

    /// Name of a code's macro, or [`UNKNOWN_MACRO`].
    pub fn macro_name_for(&self, code: &Code) -> &str {
        code.macro_id
            .as_ref()
            .and_then(|id| self.dataset.macro_by_id(id))
            .map(|m| m.name.as_str())
            .unwrap_or(UNKNOWN_MACRO)
    }

    pub fn card(&self, code: &Code, budget: PreviewBudget) -> CodeCard {
        let items = self.items_for(&code.id);
        CodeCard {
            id: code.id.clone(),
            key: code.key.clone(),
            name: code.name.clone(),
            definition: preview::definition_preview(items, budget.definition),
            rule: preview::rule_preview(items, budget.rule),
            tags: ItemKind::ALL
                .iter()
                .filter(|kind| items.iter().any(|i| i.kind == **kind))
                .map(|kind| kind.label())
                .collect(),
        }
    }

    pub fn detail(&self, code: &Code) -> CodeDetail {
        CodeDetail {
            id: code.id.clone(),
            key: code.key.clone(),
            name: code.name.clone(),
            macro_name: self.macro_name_for(code).to_string(),
            items: self
                .items_for(&code.id)
                .iter()
                .map(|item| DetailItem {
                    kind: item.kind,
                    title: item.kind.title(),
                    text: item.text.clone(),
                })
                .collect(),
        }
    }
}

/// Card data for one visible code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeCard {
    pub id: Id,
    pub key: String,
    pub name: String,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Short labels of the item kinds the code has, in [`ItemKind::ALL`] order.
    pub tags: Vec<&'static str>,
}

/// One item in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: &'static str,
    pub text: String,
}

/// Everything the detail view shows for a code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeDetail {
    pub id: Id,
    pub key: String,
    pub name: String,
    pub macro_name: String,
    pub items: Vec<DetailItem>,
}

/// Selection state. Single writer: the front end's input handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub macro_id: Option<Id>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub selected_code: Option<Id>,
}

impl ViewState {
    pub fn select_macro(&mut self, macro_id: Option<Id>) {
        self.macro_id = macro_id;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn open_code(&mut self, code_id: Id) {
        self.selected_code = Some(code_id);
    }

    pub fn close_code(&mut self) {
        self.selected_code = None;
    }

    pub fn visible_codes<'a>(&self, codebook: &'a Codebook) -> Vec<&'a Code> {
        query::filter_codes(codebook.codes(), self.macro_id.as_ref(), &self.search)
    }

    pub fn visible_cards(&self, codebook: &Codebook, budget: PreviewBudget) -> Vec<CodeCard> {
        self.visible_codes(codebook)
            .into_iter()
            .map(|code| codebook.card(code, budget))
            .collect()
    }

    /// Heading for the code list.
    pub fn title<'a>(&self, codebook: &'a Codebook) -> &'a str {
        match &self.macro_id {
            None => DEFAULT_TITLE,
            Some(id) => codebook
                .dataset()
                .macro_by_id(id)
                .map(|m| m.name.as_str())
                .unwrap_or(MACRO_NOT_FOUND),
        }
    }

    /// Detail of the open code, if one is open and it exists.
    pub fn selected_detail(&self, codebook: &Codebook) -> Option<CodeDetail> {
        let id = self.selected_code.as_ref()?;
        codebook.dataset().code_by_id(id).map(|c| codebook.detail(c))
    }
}
