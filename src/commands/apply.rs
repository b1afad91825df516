// src/commands/apply.rs

//! Converge every configured pin onto the filesystem

use anyhow::{Context, Result};
use aptpin::{apply_config, SettingWriter};
use std::path::Path;

/// Apply the pin configuration under `root`
pub fn cmd_apply(config_path: &Path, root: &Path, dry_run: bool, purge: bool) -> Result<()> {
    let config = aptpin::load_config(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let writer = SettingWriter::new(root).with_dry_run(dry_run);
    let summary = apply_config(&config, &writer, purge)
        .with_context(|| format!("Failed to apply {}", config_path.display()))?;

    for report in summary.reports.iter().filter(|r| r.outcome.is_change()) {
        println!("{:>9}  {}", report.outcome.as_str(), report.path.display());
    }
    for path in &summary.purged {
        println!("{:>9}  {}", "purged", path.display());
    }

    let prefix = if dry_run { "[dry run] " } else { "" };
    println!(
        "{}{} pin(s), {} change(s)",
        prefix,
        summary.reports.len(),
        summary.changes()
    );
    Ok(())
}
