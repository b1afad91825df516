// src/facts/mod.rs

//! Host facts
//!
//! Facts are small, best-effort observations about the host. Each fact is
//! confined to an OS family; on other families it is not evaluated and is
//! reported as absent rather than `false`.

mod os;

pub use os::{detect_os_family, HostInfo, OsFamily};

use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Sentinel written by Debian packages that need a reboot to take effect
pub const REBOOT_REQUIRED_PATH: &str = "var/run/reboot-required";

/// Whether the reboot sentinel exists under `root`
///
/// Filesystem errors (permission denied, broken mounts) count as "absent".
pub fn reboot_required(root: &Path) -> bool {
    let sentinel = root.join(REBOOT_REQUIRED_PATH);
    match sentinel.try_exists() {
        Ok(exists) => exists,
        Err(e) => {
            debug!("Cannot stat {}: {}", sentinel.display(), e);
            false
        }
    }
}

/// The `apt_reboot_required` fact
#[derive(Debug, Clone, Copy, Default)]
pub struct RebootRequiredFact;

impl RebootRequiredFact {
    pub const NAME: &'static str = "apt_reboot_required";

    /// OS family this fact applies to
    pub fn confine(&self) -> OsFamily {
        OsFamily::Debian
    }

    /// Evaluate on `host`, or `None` when the host is outside the confinement
    pub fn evaluate(&self, host: &HostInfo) -> Option<bool> {
        if host.family != self.confine() {
            debug!(
                "Skipping {}: host family is {}",
                Self::NAME,
                host.family
            );
            return None;
        }
        Some(reboot_required(&host.root))
    }
}

/// All facts collected in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facts {
    pub os_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt_reboot_required: Option<bool>,
}

/// Collect every fact for the host rooted at `root`
pub fn collect_facts(root: &Path) -> Facts {
    let host = HostInfo::detect(root);
    Facts {
        os_family: host.family.to_string(),
        apt_reboot_required: RebootRequiredFact.evaluate(&host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn host(root: &Path, family: OsFamily) -> HostInfo {
        HostInfo {
            root: root.to_path_buf(),
            family,
        }
    }

    fn touch_sentinel(root: &Path) {
        let path = root.join(REBOOT_REQUIRED_PATH);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "*** System restart required ***\n").unwrap();
    }

    #[test]
    fn test_sentinel_present() {
        let root = TempDir::new().unwrap();
        touch_sentinel(root.path());
        assert!(reboot_required(root.path()));
        assert_eq!(
            RebootRequiredFact.evaluate(&host(root.path(), OsFamily::Debian)),
            Some(true)
        );
    }

    #[test]
    fn test_sentinel_absent() {
        let root = TempDir::new().unwrap();
        assert!(!reboot_required(root.path()));
        assert_eq!(
            RebootRequiredFact.evaluate(&host(root.path(), OsFamily::Debian)),
            Some(false)
        );
    }

    #[test]
    fn test_other_family_not_evaluated() {
        let root = TempDir::new().unwrap();
        touch_sentinel(root.path());
        assert_eq!(
            RebootRequiredFact.evaluate(&host(root.path(), OsFamily::RedHat)),
            None
        );
    }

    #[test]
    fn test_collect_facts_json_omits_absent_fact() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/os-release"), "ID=fedora\n").unwrap();
        touch_sentinel(root.path());

        let facts = collect_facts(root.path());
        let json = serde_json::to_string(&facts).unwrap();
        assert_eq!(json, r#"{"os_family":"RedHat"}"#);
    }

    #[test]
    fn test_collect_facts_on_ubuntu() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(
            root.path().join("etc/os-release"),
            "NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\n",
        )
        .unwrap();
        touch_sentinel(root.path());

        let facts = collect_facts(root.path());
        assert_eq!(facts.apt_reboot_required, Some(true));
        assert_eq!(
            serde_json::to_value(&facts).unwrap(),
            serde_json::json!({"os_family": "Debian", "apt_reboot_required": true})
        );
    }
}
