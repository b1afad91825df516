// src/setting/writer.rs

//! Idempotent convergence of setting files
//!
//! The writer compares the hash of the rendered content with the hash of the
//! file on disk and only writes on mismatch. Writes go to a temp file in the
//! target directory followed by a rename, so APT never reads a half-written
//! stanza.

use super::{Setting, SettingType};
use crate::error::Result;
use crate::hash::{hash_bytes, hash_file};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What applying a setting did (or would do, in dry-run mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Updated,
    Unchanged,
    Removed,
    AlreadyAbsent,
}

impl ApplyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplyOutcome::Created => "created",
            ApplyOutcome::Updated => "updated",
            ApplyOutcome::Unchanged => "unchanged",
            ApplyOutcome::Removed => "removed",
            ApplyOutcome::AlreadyAbsent => "absent",
        }
    }

    /// Whether the file on disk changed
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            ApplyOutcome::Created | ApplyOutcome::Updated | ApplyOutcome::Removed
        )
    }
}

/// Result of applying one setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub path: PathBuf,
    pub outcome: ApplyOutcome,
    /// The setting asked for an index refresh and the file changed
    pub refresh_requested: bool,
}

/// Writes and removes setting files under a filesystem root
#[derive(Debug, Clone)]
pub struct SettingWriter {
    /// Root filesystem path (usually "/")
    root: PathBuf,
    dry_run: bool,
}

impl SettingWriter {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run: false,
        }
    }

    /// Compute outcomes without touching the filesystem
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Absolute path of a setting under this writer's root
    pub fn target_path(&self, setting: &Setting) -> PathBuf {
        self.root.join(setting.relative_path())
    }

    /// Converge one setting file to its desired state
    pub fn apply(&self, setting: &Setting) -> Result<ApplyReport> {
        setting.validate()?;
        let path = self.target_path(setting);

        let outcome = if setting.ensure.is_present() {
            self.ensure_content(&path, &setting.content)?
        } else {
            self.ensure_absent(&path)?
        };

        let refresh_requested = setting.notify_update && outcome.is_change();
        if outcome.is_change() {
            info!("{} {} ({})", setting.title(), outcome.as_str(), path.display());
        } else {
            debug!("{} {} ({})", setting.title(), outcome.as_str(), path.display());
        }

        Ok(ApplyReport {
            path,
            outcome,
            refresh_requested,
        })
    }

    fn ensure_content(&self, path: &Path, content: &str) -> Result<ApplyOutcome> {
        let desired = hash_bytes(content.as_bytes());
        let outcome = match hash_file(path)? {
            Some(current) if current == desired => return Ok(ApplyOutcome::Unchanged),
            Some(current) => {
                debug!(
                    "Content mismatch for {}: {} -> {}",
                    path.display(),
                    current.to_prefixed_string(),
                    desired.to_prefixed_string()
                );
                ApplyOutcome::Updated
            }
            None => ApplyOutcome::Created,
        };

        if !self.dry_run {
            write_atomic(path, content.as_bytes())?;
        }
        Ok(outcome)
    }

    fn ensure_absent(&self, path: &Path) -> Result<ApplyOutcome> {
        if !path.exists() {
            return Ok(ApplyOutcome::AlreadyAbsent);
        }
        if !self.dry_run {
            fs::remove_file(path)?;
        }
        Ok(ApplyOutcome::Removed)
    }

    /// Remove files in a setting directory that are not in `keep`
    ///
    /// Returns the paths that were (or, in dry-run mode, would be) removed.
    /// A missing directory is treated as empty.
    pub fn purge(&self, setting_type: SettingType, keep: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(setting_type.directory());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut removed = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() || keep.contains(&path) {
                continue;
            }
            if !self.dry_run {
                fs::remove_file(&path)?;
            }
            info!("Purged unmanaged {} file {}", setting_type, path.display());
            removed.push(path);
        }
        removed.sort();
        Ok(removed)
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
