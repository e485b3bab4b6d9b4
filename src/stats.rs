//! Dataset statistics and health overview.
//!
//! Summarizes what was loaded: collection sizes, items per kind, and the
//! references that do not resolve. Dangling references are normal states,
//! not errors; this command is where they become visible.

use anyhow::Result;
use codebook_core::preview::{truncate, DEFAULT_BUDGET};
use codebook_core::{Codebook, ItemKind};

use crate::load::DatasetSource;

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub macros: usize,
    pub codes: usize,
    pub items: usize,
    pub by_kind: Vec<(ItemKind, usize)>,
    pub codes_without_items: usize,
    pub dangling_codes: Vec<String>,
    /// `(code id, truncated text)` of items pointing at no code.
    pub orphan_items: Vec<(String, String)>,
}

pub fn collect(codebook: &Codebook) -> Stats {
    let dataset = codebook.dataset();

    let by_kind = ItemKind::ALL
        .iter()
        .map(|kind| {
            let n = dataset.items.iter().filter(|i| i.kind == *kind).count();
            (*kind, n)
        })
        .collect();

    let codes_without_items = dataset
        .codes
        .iter()
        .filter(|c| codebook.items_for(&c.id).is_empty())
        .count();

    Stats {
        macros: dataset.macros.len(),
        codes: dataset.codes.len(),
        items: dataset.items.len(),
        by_kind,
        codes_without_items,
        dangling_codes: dataset
            .dangling_codes()
            .iter()
            .map(|c| c.id.to_string())
            .collect(),
        orphan_items: codebook
            .index()
            .orphans(&dataset.codes)
            .iter()
            .map(|i| (i.code_id.to_string(), truncate(&i.text, DEFAULT_BUDGET)))
            .collect(),
    }
}

pub fn run_stats(source: &DatasetSource, codebook: &Codebook) -> Result<()> {
    let stats = collect(codebook);

    println!("Codebook — Dataset Stats");
    println!("========================");
    println!();
    println!("  File:        {}", source.path.display());
    if let Some(ref sha) = source.sha256 {
        println!("  SHA-256:     {}", sha);
    }
    println!();
    println!("  Macros:      {}", stats.macros);
    println!("  Codes:       {}", stats.codes);
    println!("  Items:       {}", stats.items);
    println!();
    println!("  By kind:");
    for (kind, n) in &stats.by_kind {
        println!("  {:<16} {:>6}", kind.as_str(), n);
    }
    println!();
    println!("  Codes without items:   {}", stats.codes_without_items);
    println!("  Dangling macro refs:   {}", stats.dangling_codes.len());
    println!("  Orphan items:          {}", stats.orphan_items.len());
    println!("  Skipped records:       {}", source.report.skipped.len());

    if !stats.dangling_codes.is_empty() {
        println!();
        println!("  Codes with unresolved macro: {}", stats.dangling_codes.join(", "));
    }

    if !stats.orphan_items.is_empty() {
        println!();
        println!("  Orphan items:");
        for (code_id, text) in &stats.orphan_items {
            println!("    code {}: {}", code_id, text.replace('\n', " "));
        }
    }

    if !source.report.skipped.is_empty() {
        println!();
        println!("  Skipped:");
        for s in &source.report.skipped {
            println!("    {}[{}]: {}", s.collection, s.position, s.reason);
        }
    }

    println!();
    Ok(())
}
