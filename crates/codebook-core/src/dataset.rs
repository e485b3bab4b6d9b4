//! Dataset loading.
//!
//! The loader never fails. A missing or malformed collection becomes an
//! empty one, and individual records that cannot be represented are skipped
//! and reported. Whether the result is usable is a separate question
//! answered by [`Dataset::check`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Code, Id, Item, Macro};

/// The one domain error: nothing to browse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("dataset is empty ({macros} macros, {codes} codes)")]
    Empty { macros: usize, codes: usize },
}

/// The three immutable collections of a codebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub macros: Vec<Macro>,
    pub codes: Vec<Code>,
    pub items: Vec<Item>,
}

/// A record dropped during load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub collection: &'static str,
    pub position: usize,
    pub reason: String,
}

/// What the loader had to work around.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Document-level problem (unparseable text, non-object root).
    pub problem: Option<String>,
    /// Collections that were absent or not arrays.
    pub defaulted: Vec<&'static str>,
    pub skipped: Vec<SkippedRecord>,
}

/// Result of a load: always a dataset, plus a report.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub dataset: Dataset,
    pub report: LoadReport,
}

impl Dataset {
    /// Load from JSON text. Unparseable input yields an empty dataset.
    pub fn from_json_str(text: &str) -> Loaded {
        Self::from_json_slice(text.as_bytes())
    }

    /// Load from raw file bytes. Invalid UTF-8 is reported like any other
    /// parse problem instead of being replaced.
    pub fn from_json_slice(bytes: &[u8]) -> Loaded {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::warn!(error = %e, "codebook document is not valid JSON");
                Loaded {
                    dataset: Dataset::default(),
                    report: LoadReport {
                        problem: Some(format!("invalid JSON: {}", e)),
                        ..LoadReport::default()
                    },
                }
            }
        }
    }

    /// Load from an already-parsed document.
    pub fn from_value(doc: &Value) -> Loaded {
        let mut report = LoadReport::default();

        if !doc.is_object() {
            tracing::warn!("codebook document root is not an object");
            report.problem = Some("document root is not an object".to_string());
        }

        let macros = collection::<Macro>(doc, "macros", &mut report);
        let codes = collection::<Code>(doc, "codes", &mut report);
        let items = collection::<Item>(doc, "items", &mut report);

        tracing::debug!(
            macros = macros.len(),
            codes = codes.len(),
            items = items.len(),
            skipped = report.skipped.len(),
            "codebook loaded"
        );

        Loaded {
            dataset: Dataset {
                macros,
                codes,
                items,
            },
            report,
        }
    }

    /// Fails when there is nothing to browse: no macros or no codes.
    pub fn check(&self) -> Result<(), DatasetError> {
        if self.macros.is_empty() || self.codes.is_empty() {
            return Err(DatasetError::Empty {
                macros: self.macros.len(),
                codes: self.codes.len(),
            });
        }
        Ok(())
    }

    pub fn macro_by_id(&self, id: &Id) -> Option<&Macro> {
        self.macros.iter().find(|m| &m.id == id)
    }

    pub fn code_by_id(&self, id: &Id) -> Option<&Code> {
        self.codes.iter().find(|c| &c.id == id)
    }

    /// Match a typed token against existing macro ids by display form.
    ///
    /// Unknown tokens still produce an id, so filtering on them yields an
    /// empty result instead of an error.
    pub fn resolve_macro_id(&self, token: &str) -> Id {
        resolve(self.macros.iter().map(|m| &m.id), token)
    }

    /// Same as [`resolve_macro_id`](Self::resolve_macro_id) for codes.
    pub fn resolve_code_id(&self, token: &str) -> Id {
        resolve(self.codes.iter().map(|c| &c.id), token)
    }

    /// Codes whose `macro_id` is unset or names no macro.
    pub fn dangling_codes(&self) -> Vec<&Code> {
        self.codes
            .iter()
            .filter(|c| match &c.macro_id {
                Some(id) => self.macro_by_id(id).is_none(),
                None => true,
            })
            .collect()
    }
}

fn resolve<'a>(mut ids: impl Iterator<Item = &'a Id>, token: &str) -> Id {
    let token = token.trim();
    ids.find(|id| id.to_string() == token)
        .cloned()
        .unwrap_or_else(|| Id::parse(token))
}

/// Read one named collection, defaulting to empty and skipping bad records.
fn collection<T: DeserializeOwned>(
    doc: &Value,
    name: &'static str,
    report: &mut LoadReport,
) -> Vec<T> {
    let records = match doc.get(name).and_then(Value::as_array) {
        Some(records) => records,
        None => {
            tracing::warn!(collection = name, "collection missing or not an array");
            report.defaulted.push(name);
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match serde_json::from_value::<T>(record.clone()) {
            Ok(value) => out.push(value),
            Err(e) => {
                tracing::warn!(collection = name, position, error = %e, "skipping record");
                report.skipped.push(SkippedRecord {
                    collection: name,
                    position,
                    reason: e.to_string(),
                });
            }
        }
    }
    out
}
