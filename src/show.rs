//! Code detail for `cbk show`.
//!
//! Prints a code's header, its macro, and every item in display order.

use anyhow::{bail, Result};
use codebook_core::view::CodeDetail;
use codebook_core::Codebook;

/// Detail of the code whose id displays as `token`.
pub fn get_code(codebook: &Codebook, token: &str) -> Result<CodeDetail> {
    let id = codebook.dataset().resolve_code_id(token);
    match codebook.dataset().code_by_id(&id) {
        Some(code) => Ok(codebook.detail(code)),
        None => bail!("code not found: {}", token),
    }
}

pub fn run_show(codebook: &Codebook, token: &str, json: bool) -> Result<()> {
    let detail = get_code(codebook, token)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("--- Code ---");
    println!("id:     {}", detail.id);
    println!("name:   {}", detail.name);
    println!("key:    {}", detail.key);
    println!("macro:  {}", detail.macro_name);
    println!();

    println!("--- Items ({}) ---", detail.items.len());
    for item in &detail.items {
        println!("[{}]", item.title);
        println!("{}", item.text);
        println!();
    }

    Ok(())
}
