// src/commands/facts.rs

//! Host fact reporting

use anyhow::Result;
use std::path::Path;

/// Print collected facts as pretty JSON
pub fn cmd_facts(root: &Path) -> Result<()> {
    let facts = aptpin::collect_facts(root);
    println!("{}", serde_json::to_string_pretty(&facts)?);
    Ok(())
}
