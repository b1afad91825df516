// src/commands/check.rs

//! Configuration validation

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Load the configuration and validate every pin in it
pub fn cmd_check(config_path: &Path) -> Result<()> {
    let config = aptpin::load_config(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let rendered = config
        .render_all()
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    info!("Validated {}", config_path.display());
    for pin in &rendered {
        println!("  ok  {} -> {}", pin.setting.title(), pin.setting.file_name());
    }
    println!("{} pin(s) valid", rendered.len());
    Ok(())
}
