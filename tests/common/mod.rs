// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a target root that looks like a Debian system.
///
/// Returns the TempDir - keep it alive to prevent cleanup.
pub fn debian_root() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let etc = temp_dir.path().join("etc");
    fs::create_dir_all(etc.join("apt/preferences.d")).unwrap();
    fs::write(
        etc.join("os-release"),
        "PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\nID=debian\nVERSION_CODENAME=bookworm\n",
    )
    .unwrap();
    fs::write(etc.join("debian_version"), "12.5\n").unwrap();
    temp_dir
}

/// Write a pins.toml into `dir` and return its path.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("pins.toml");
    fs::write(&path, content).unwrap();
    path
}

/// Path of a preferences file under `root`.
pub fn pref_path(root: &Path, file: &str) -> PathBuf {
    root.join("etc/apt/preferences.d").join(file)
}
