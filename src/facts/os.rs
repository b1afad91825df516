// src/facts/os.rs

//! OS family detection from `/etc/os-release`

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Distribution family, in the coarse sense used for fact confinement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Debian,
    RedHat,
    Suse,
    Arch,
    /// Recognised os-release with an ID outside the known families
    Other(String),
    Unknown,
}

impl OsFamily {
    /// Map an os-release `ID` or `ID_LIKE` entry to a family
    fn from_id(id: &str) -> Option<Self> {
        match id {
            "debian" | "ubuntu" | "raspbian" | "linuxmint" => Some(OsFamily::Debian),
            "rhel" | "fedora" | "centos" | "rocky" | "almalinux" => Some(OsFamily::RedHat),
            "suse" | "opensuse" | "sles" | "opensuse-leap" | "opensuse-tumbleweed" => {
                Some(OsFamily::Suse)
            }
            "arch" | "manjaro" | "endeavouros" => Some(OsFamily::Arch),
            _ => None,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Debian => write!(f, "Debian"),
            OsFamily::RedHat => write!(f, "RedHat"),
            OsFamily::Suse => write!(f, "Suse"),
            OsFamily::Arch => write!(f, "Archlinux"),
            OsFamily::Other(id) => write!(f, "{}", id),
            OsFamily::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The host a fact is evaluated against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub root: PathBuf,
    pub family: OsFamily,
}

impl HostInfo {
    pub fn detect(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            family: detect_os_family(root),
        }
    }
}

/// Detect the OS family of the system rooted at `root`
///
/// Reads `ID` and `ID_LIKE` from `etc/os-release` (then `usr/lib/os-release`),
/// falling back to the presence of `etc/debian_version`.
pub fn detect_os_family(root: &Path) -> OsFamily {
    for candidate in ["etc/os-release", "usr/lib/os-release"] {
        let path = root.join(candidate);
        match fs::read_to_string(&path) {
            Ok(content) => return family_from_os_release(&content),
            Err(e) => debug!("Cannot read {}: {}", path.display(), e),
        }
    }

    if root.join("etc/debian_version").is_file() {
        return OsFamily::Debian;
    }
    OsFamily::Unknown
}

fn family_from_os_release(content: &str) -> OsFamily {
    let mut id = None;
    let mut id_like = Vec::new();

    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
        match key {
            "ID" => id = Some(value.to_lowercase()),
            "ID_LIKE" => id_like = value.split_whitespace().map(str::to_lowercase).collect(),
            _ => {}
        }
    }

    let Some(id) = id else {
        return OsFamily::Unknown;
    };

    let known = std::iter::once(id.as_str())
        .chain(id_like.iter().map(String::as_str))
        .find_map(OsFamily::from_id);
    known.unwrap_or(OsFamily::Other(id))
}
