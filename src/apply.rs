// src/apply.rs

//! Converging a whole pin configuration
//!
//! Every pin is rendered and validated before the first file is touched, so
//! an invalid entry leaves the target root as it was.

use crate::config::PinConfig;
use crate::error::Result;
use crate::setting::{ApplyReport, SettingType, SettingWriter};
use std::path::PathBuf;
use tracing::{info, warn};

/// What one `apply_config` run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// One report per pin, in configuration order
    pub reports: Vec<ApplyReport>,
    /// Unmanaged preference files removed by purge
    pub purged: Vec<PathBuf>,
    /// Some setting asked for a package index refresh and changed
    pub refresh_requested: bool,
}

impl ApplySummary {
    /// Number of files created, updated, removed or purged
    pub fn changes(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_change()).count() + self.purged.len()
    }
}

/// Apply every pin in `config` through `writer`
///
/// Purging runs when `purge` is set or the config enables `options.purge`.
/// Files of pins with `ensure = "absent"` are not kept by the purge.
pub fn apply_config(config: &PinConfig, writer: &SettingWriter, purge: bool) -> Result<ApplySummary> {
    let rendered = config.render_all()?;
    let mut summary = ApplySummary::default();
    let mut keep = Vec::new();

    for pin in &rendered {
        let report = writer.apply(&pin.setting)?;
        if pin.setting.ensure.is_present() {
            keep.push(report.path.clone());
        }
        summary.refresh_requested |= report.refresh_requested;
        summary.reports.push(report);
    }

    if purge || config.options.purge {
        summary.purged = writer.purge(SettingType::Pref, &keep)?;
    }

    if summary.refresh_requested {
        warn!("Package index refresh requested; run apt-get update");
    }
    info!(
        "{} pin(s) processed, {} change(s)",
        summary.reports.len(),
        summary.changes()
    );
    Ok(summary)
}
