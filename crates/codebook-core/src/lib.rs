//! # Codebook Core
//!
//! Pure logic for browsing a codebook: data models, the lenient dataset
//! loader, the code → items index, the query engine, and card previews.
//!
//! This crate performs no file or network I/O. Callers hand it JSON (text
//! or an already-parsed value) and drive it through a [`view::ViewState`].
//!
//! ```text
//! JSON ──▶ Dataset::from_value ──▶ Codebook::new ──▶ ItemIndex
//!                                        │
//!            ViewState { macro, search } ┴──▶ filter_codes ──▶ cards / detail
//! ```

pub mod dataset;
pub mod index;
pub mod models;
pub mod preview;
pub mod query;
pub mod view;

pub use dataset::{Dataset, DatasetError, LoadReport, Loaded};
pub use index::ItemIndex;
pub use models::{Code, Id, Item, ItemKind, Macro};
pub use view::{Codebook, PreviewBudget, ViewState};
