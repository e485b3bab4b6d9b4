//! Core data models for a codebook.
//!
//! A codebook has three flat collections: macro-categories, codes, and the
//! items annotating each code. Relations between them are plain id
//! references, never pointers.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Sort key used for items whose `order` is absent.
pub const MISSING_ORDER: i64 = 999;

/// Opaque record identifier: a JSON number or a string.
///
/// Equality is strict, so `1` and `"1"` are different ids. Integers that
/// fit in an `i64` are always held as [`Id::Int`]; any other number
/// (fractions, exponents, values past `i64::MAX`) is kept as written in
/// [`Id::Num`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Num(serde_json::Number),
    Str(String),
}

impl Id {
    /// Parse a user-supplied token: integers win, then other JSON numbers,
    /// anything else is a string.
    pub fn parse(token: &str) -> Self {
        if let Ok(n) = token.parse::<i64>() {
            return Id::Int(n);
        }
        match token.parse::<serde_json::Number>() {
            Ok(n) => Id::from_number(n),
            Err(_) => Id::Str(token.to_string()),
        }
    }

    pub fn from_number(n: serde_json::Number) -> Self {
        match n.as_i64() {
            Some(i) => Id::Int(i),
            None => Id::Num(n),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{}", n),
            Id::Num(n) => write!(f, "{}", n),
            Id::Str(s) => f.write_str(s),
        }
    }
}

/// Top-level category grouping codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macro {
    pub id: Id,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

/// A single code with its short key and descriptive name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub id: Id,
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Parent macro. Not guaranteed to resolve.
    #[serde(default, deserialize_with = "lenient_id")]
    pub macro_id: Option<Id>,
}

/// Kind of annotation attached to a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Definition,
    Inclusion,
    Exclusion,
    Example,
    BorderRule,
    AnalyticNote,
}

impl ItemKind {
    pub const ALL: [ItemKind; 6] = [
        ItemKind::Definition,
        ItemKind::Inclusion,
        ItemKind::Exclusion,
        ItemKind::Example,
        ItemKind::BorderRule,
        ItemKind::AnalyticNote,
    ];

    /// Wire name as it appears in the dataset.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Definition => "definition",
            ItemKind::Inclusion => "inclusion",
            ItemKind::Exclusion => "exclusion",
            ItemKind::Example => "example",
            ItemKind::BorderRule => "border_rule",
            ItemKind::AnalyticNote => "analytic_note",
        }
    }

    /// Short tag shown on cards.
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Definition => "Definition",
            ItemKind::Inclusion => "Inclusion",
            ItemKind::Exclusion => "Exclusion",
            ItemKind::Example => "Example",
            ItemKind::BorderRule => "Rule",
            ItemKind::AnalyticNote => "Note",
        }
    }

    /// Heading shown in the detail view.
    pub fn title(self) -> &'static str {
        match self {
            ItemKind::Definition => "Definition",
            ItemKind::Inclusion => "Inclusion",
            ItemKind::Exclusion => "Exclusion",
            ItemKind::Example => "Example",
            ItemKind::BorderRule => "Border Rule",
            ItemKind::AnalyticNote => "Analytic Note",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An annotation on a code: definition, inclusion rule, example, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub code_id: Id,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Option<i64>,
}

impl Item {
    /// Display sort key; absent `order` sorts after every present value
    /// below [`MISSING_ORDER`].
    pub fn sort_key(&self) -> i64 {
        self.order.unwrap_or(MISSING_ORDER)
    }
}

/// Strings that are `null` or not strings at all read as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

/// Optional references that are neither numbers nor strings read as unset.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<Id>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(Id::Str(s)),
        serde_json::Value::Number(n) => Some(Id::from_number(n)),
        _ => None,
    })
}

/// Only JSON integers count as an order; anything else is treated as absent.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}
