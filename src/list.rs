//! Filtered code listing for `cbk list`.
//!
//! Applies the macro and search filters of a [`ViewState`] and prints one
//! card per visible code, in dataset order.

use anyhow::Result;
use codebook_core::view::CodeCard;
use codebook_core::{Codebook, PreviewBudget, ViewState};
use serde::Serialize;

/// `--json` output shape.
#[derive(Debug, Serialize)]
pub struct ListResponse<'a> {
    pub title: &'a str,
    pub view: &'a ViewState,
    pub count: usize,
    pub codes: Vec<CodeCard>,
}

/// Build a view from CLI filters. `macro_token` is matched against the
/// display form of existing macro ids.
pub fn view_from_args(
    codebook: &Codebook,
    macro_token: Option<&str>,
    search: Option<&str>,
) -> ViewState {
    let mut view = ViewState::default();
    view.select_macro(macro_token.map(|t| codebook.dataset().resolve_macro_id(t)));
    view.set_search(search.unwrap_or(""));
    view
}

pub fn list_codes<'a>(
    codebook: &'a Codebook,
    view: &'a ViewState,
    budget: PreviewBudget,
) -> ListResponse<'a> {
    let codes = view.visible_cards(codebook, budget);
    ListResponse {
        title: view.title(codebook),
        view,
        count: codes.len(),
        codes,
    }
}

pub fn run_list(
    codebook: &Codebook,
    view: &ViewState,
    budget: PreviewBudget,
    json: bool,
) -> Result<()> {
    let response = list_codes(codebook, view, budget);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", response.title);
    println!(
        "{} {}",
        response.count,
        if response.count == 1 {
            "entity"
        } else {
            "entities"
        }
    );
    println!();

    for card in &response.codes {
        println!("[{}] {}", card.id, card.name);
        println!("    key:  {}", card.key);
        if !card.tags.is_empty() {
            println!("    tags: {}", card.tags.join(", "));
        }
        println!("    def:  {}", card.definition.replace('\n', " "));
        if let Some(ref rule) = card.rule {
            println!("    rule: {}", rule.replace('\n', " "));
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebook_core::{Dataset, Id};
    use serde_json::json;

    fn codebook() -> Codebook {
        let doc = json!({
            "macros": [{"id": "M1", "name": "Health"}],
            "codes": [
                {"id": 1, "key": "HOSP", "name": "Hospitals", "macro_id": "M1"},
                {"id": 2, "key": "VAX", "name": "Vaccines", "macro_id": "M1"}
            ],
            "items": [{"code_id": 2, "type": "definition", "text": "Immunisation programmes"}]
        });
        Codebook::new(Dataset::from_value(&doc).dataset).unwrap()
    }

    #[test]
    fn test_view_from_args_resolves_string_macro() {
        let cb = codebook();
        let view = view_from_args(&cb, Some("M1"), Some("vax"));
        assert_eq!(view.macro_id, Some(Id::Str("M1".into())));
        let response = list_codes(&cb, &view, PreviewBudget::default());
        assert_eq!(response.title, "Health");
        assert_eq!(response.count, 1);
        assert_eq!(response.codes[0].definition, "Immunisation programmes");
    }

    #[test]
    fn test_budget_applies() {
        let cb = codebook();
        let view = view_from_args(&cb, None, Some("vaccines"));
        let budget = PreviewBudget {
            definition: 5,
            rule: 5,
        };
        let response = list_codes(&cb, &view, budget);
        assert_eq!(response.codes[0].definition, "Immun…");
    }

    #[test]
    fn test_unknown_macro_lists_nothing() {
        let cb = codebook();
        let view = view_from_args(&cb, Some("M2"), None);
        let response = list_codes(&cb, &view, PreviewBudget::default());
        assert_eq!(response.count, 0);
        assert_eq!(response.title, codebook_core::view::MACRO_NOT_FOUND);
    }
}
