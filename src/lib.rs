//! # Codebook
//!
//! A local browser for static codebooks.
//!
//! A codebook is a single JSON document with three collections:
//! macro-categories, codes, and the items annotating each code
//! (definitions, inclusion and exclusion rules, examples, border rules,
//! analytic notes). This crate reads that document, indexes it once, and
//! lets a user filter, search, and drill into codes from the `cbk` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌───────────────┐
//! │ codebook.json│──▶│ Loader + Indexer │──▶│ Query Engine   │
//! │   (static)   │   │ (codebook-core)  │   │ macro + search │
//! └──────────────┘   └──────────────────┘   └───────┬───────┘
//!                                                   ▼
//!                                            ┌────────────┐
//!                                            │ CLI (cbk)  │
//!                                            └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cbk macros                         # categories with code counts
//! cbk list --macro 1 --search foo    # filtered cards
//! cbk show 10                        # one code with all its items
//! cbk stats                          # sizes and unresolved references
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`load`] | Reading the dataset file |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`macros`] | `cbk macros` |
//! | [`list`] | `cbk list` |
//! | [`show`] | `cbk show` |
//! | [`stats`] | `cbk stats` |

pub mod config;
pub mod list;
pub mod load;
pub mod logging;
pub mod macros;
pub mod show;
pub mod stats;
