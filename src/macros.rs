//! Macro-category listing for `cbk macros`.

use anyhow::Result;
use codebook_core::Codebook;

/// Label for the "no macro filter" row.
pub const ALL_AREAS: &str = "All areas";

pub fn run_macros(codebook: &Codebook) -> Result<()> {
    println!("{:<12} {:>6}  NAME", "ID", "CODES");
    println!("{:<12} {:>6}  {}", "-", codebook.codes().len(), ALL_AREAS);

    for m in codebook.macros() {
        println!(
            "{:<12} {:>6}  {}",
            m.id.to_string(),
            codebook.code_count(&m.id),
            m.name
        );
    }

    Ok(())
}
