// src/pin/mod.rs

//! APT pin requests
//!
//! A pin request describes one stanza in `/etc/apt/preferences.d`: which
//! packages it matches, what it pins them to (a release, an origin or a
//! version) and with which priority. Requests are validated before anything
//! is rendered, so a rejected request never reaches the disk.
//!
//! # Forms
//!
//! - **Specific form**: `packages` names one or more packages. At most one of
//!   the release-family fields, `origin` or `version` may be set.
//! - **General form**: `packages` is exactly `*`. `version` is not allowed, and
//!   release-family fields exclude `origin`.

mod render;

pub use render::{render_pin, RenderedPin, HEADER};

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Default load order of a pin file among all preference files
pub const DEFAULT_ORDER: u32 = 50;

/// Package match that selects every package
pub const WILDCARD: &str = "*";

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^0-9a-z\-_.]").unwrap());

/// Desired state of a managed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// Plain file must exist (same as `Present`)
    File,
    #[default]
    Present,
    Absent,
}

impl Ensure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ensure::File => "file",
            Ensure::Present => "present",
            Ensure::Absent => "absent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "file" => Some(Ensure::File),
            "present" => Some(Ensure::Present),
            "absent" => Some(Ensure::Absent),
            _ => None,
        }
    }

    /// Whether the file should exist after convergence
    pub fn is_present(&self) -> bool {
        !matches!(self, Ensure::Absent)
    }
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ensure {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown ensure value '{}' (expected file, present or absent)", s))
    }
}

/// Package match: a single expression or an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Packages {
    One(String),
    Many(Vec<String>),
}

impl Packages {
    /// Space-joined form used on the `Package:` line
    pub fn to_line(&self) -> String {
        match self {
            Packages::One(s) => s.clone(),
            Packages::Many(list) => list.join(" "),
        }
    }
}

impl Default for Packages {
    fn default() -> Self {
        Packages::One(WILDCARD.to_string())
    }
}

impl From<&str> for Packages {
    fn from(s: &str) -> Self {
        Packages::One(s.to_string())
    }
}

impl From<Vec<String>> for Packages {
    fn from(list: Vec<String>) -> Self {
        Packages::Many(list)
    }
}

/// Pin priority, accepted as an integer or as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Int(i64),
    Text(String),
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Int(0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Int(n) => write!(f, "{}", n),
            Priority::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => Priority::Int(n),
            Err(_) => Priority::Text(s.to_string()),
        })
    }
}

/// A request to manage one APT pin file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinRequest {
    /// Pin identifier; also the source of the file name
    pub name: String,

    #[serde(default)]
    pub ensure: Ensure,

    /// Comment written as `Explanation:`; defaults to "<caller>: <name>"
    #[serde(default)]
    pub explanation: Option<String>,

    /// Load order among preference files
    #[serde(default = "default_order")]
    pub order: u32,

    #[serde(default)]
    pub packages: Packages,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub codename: Option<String>,
    #[serde(default)]
    pub release_version: Option<String>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub originator: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

fn default_order() -> u32 {
    DEFAULT_ORDER
}

/// Treat an empty string the same as an unset field
fn is_set(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// Replace every character outside `[0-9a-z\-_.]` (case-insensitive) with `_`
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_FILE_CHARS.replace_all(name, "_").into_owned()
}

impl PinRequest {
    /// Create a request with every optional field at its default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ensure: Ensure::default(),
            explanation: None,
            order: DEFAULT_ORDER,
            packages: Packages::default(),
            priority: Priority::default(),
            release: None,
            origin: None,
            version: None,
            codename: None,
            release_version: None,
            component: None,
            originator: None,
            label: None,
        }
    }

    /// Concatenation of all release-family fields, in fixed order
    pub fn pin_release(&self) -> String {
        [
            &self.release,
            &self.codename,
            &self.release_version,
            &self.component,
            &self.originator,
            &self.label,
        ]
        .into_iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect()
    }

    pub fn packages_string(&self) -> String {
        self.packages.to_line()
    }

    /// File name stem safe for `preferences.d`
    pub fn file_name(&self) -> String {
        sanitize_file_name(&self.name)
    }

    /// Whether the request uses the general (`*`) form
    pub fn is_general(&self) -> bool {
        self.packages_string() == WILDCARD
    }

    /// Check the mutual-exclusion rules between pin targets
    pub fn validate(&self) -> Result<()> {
        let release_set = !self.pin_release().is_empty();
        let origin_set = is_set(&self.origin);
        let version_set = is_set(&self.version);

        if !self.is_general() {
            if (release_set && (origin_set || version_set))
                || (version_set && (release_set || origin_set))
            {
                return Err(Error::MutualExclusion(format!(
                    "pin '{}': parameters release, origin, and version are mutually exclusive",
                    self.name
                )));
            }
        } else {
            if version_set {
                return Err(Error::InvalidParameter(format!(
                    "pin '{}': parameter version cannot be used in general form",
                    self.name
                )));
            }
            if release_set && origin_set {
                return Err(Error::MutualExclusion(format!(
                    "pin '{}': parameters release and origin are mutually exclusive",
                    self.name
                )));
            }
        }

        self.validate_values()
    }

    /// Every value lands on a single stanza line, so none may be empty
    /// where APT needs a value or carry control characters
    fn validate_values(&self) -> Result<()> {
        let entries: Vec<&str> = match &self.packages {
            Packages::One(s) => vec![s.as_str()],
            Packages::Many(list) => list.iter().map(String::as_str).collect(),
        };
        if entries.is_empty() || entries.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::InvalidParameter(format!(
                "pin '{}': packages must not be empty",
                self.name
            )));
        }

        let priority = self.priority.to_string();
        let fields = [
            ("name", Some(self.name.as_str())),
            ("priority", Some(priority.as_str())),
            ("release", self.release.as_deref()),
            ("origin", self.origin.as_deref()),
            ("version", self.version.as_deref()),
            ("codename", self.codename.as_deref()),
            ("release_version", self.release_version.as_deref()),
            ("component", self.component.as_deref()),
            ("originator", self.originator.as_deref()),
            ("label", self.label.as_deref()),
        ];
        let packages = entries.iter().map(|p| ("packages", Some(*p)));

        for (field, value) in fields.into_iter().chain(packages) {
            if value.is_some_and(|v| v.chars().any(char::is_control)) {
                return Err(Error::InvalidParameter(format!(
                    "pin '{}': parameter {} contains control characters",
                    self.name.escape_default(),
                    field
                )));
            }
        }

        Ok(())
    }

    pub(crate) fn target(field: &Option<String>) -> Option<&str> {
        field.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specific(name: &str) -> PinRequest {
        PinRequest {
            packages: Packages::One("nginx".to_string()),
            ..PinRequest::new(name)
        }
    }

    #[test]
    fn test_defaults() {
        let req = PinRequest::new("nginx");
        assert_eq!(req.order, 50);
        assert_eq!(req.ensure, Ensure::Present);
        assert_eq!(req.packages_string(), "*");
        assert_eq!(req.priority, Priority::Int(0));
        assert!(req.is_general());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my name!@#.list"), "my_name___.list");
        assert_eq!(sanitize_file_name("Nginx-Stable_1.24"), "Nginx-Stable_1.24");
        assert_eq!(sanitize_file_name("a/b"), "a_b");
    }

    #[test]
    fn test_pin_release_order() {
        let req = PinRequest {
            release: Some(String::new()),
            codename: Some("bullseye".to_string()),
            ..PinRequest::new("deb")
        };
        assert_eq!(req.pin_release(), "bullseye");

        let req = PinRequest {
            release: Some("stable".to_string()),
            component: Some("main".to_string()),
            label: Some("Debian".to_string()),
            codename: Some("bookworm".to_string()),
            ..PinRequest::new("deb")
        };
        assert_eq!(req.pin_release(), "stablebookwormmainDebian");
    }

    #[test]
    fn test_packages_string() {
        let req = PinRequest {
            packages: Packages::Many(vec!["nginx".to_string(), "nginx-common".to_string()]),
            ..PinRequest::new("nginx")
        };
        assert_eq!(req.packages_string(), "nginx nginx-common");
        assert!(!req.is_general());
    }

    #[test]
    fn test_list_of_only_wildcard_is_general() {
        let req = PinRequest {
            packages: Packages::Many(vec!["*".to_string()]),
            version: Some("1.0".to_string()),
            ..PinRequest::new("all")
        };
        assert!(matches!(req.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_specific_form_single_target_ok() {
        for req in [
            PinRequest { release: Some("stable".into()), ..specific("a") },
            PinRequest { origin: Some("deb.example.org".into()), ..specific("b") },
            PinRequest { version: Some("1.24*".into()), ..specific("c") },
            specific("d"),
        ] {
            assert!(req.validate().is_ok(), "{:?}", req);
        }
    }

    #[test]
    fn test_specific_form_pairs_conflict() {
        let cases = [
            PinRequest { release: Some("stable".into()), origin: Some("o".into()), ..specific("a") },
            PinRequest { codename: Some("bookworm".into()), version: Some("1".into()), ..specific("b") },
            PinRequest { origin: Some("o".into()), version: Some("1".into()), ..specific("c") },
            PinRequest {
                label: Some("Debian".into()),
                origin: Some("o".into()),
                version: Some("1".into()),
                ..specific("d")
            },
        ];
        for req in cases {
            assert!(matches!(req.validate(), Err(Error::MutualExclusion(_))), "{:?}", req);
        }
    }

    #[test]
    fn test_general_form_rejects_version() {
        let req = PinRequest {
            version: Some("1.0".into()),
            ..PinRequest::new("all")
        };
        assert!(matches!(req.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_general_form_version_checked_before_release_origin() {
        let req = PinRequest {
            version: Some("1.0".into()),
            release: Some("stable".into()),
            origin: Some("o".into()),
            ..PinRequest::new("all")
        };
        assert!(matches!(req.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_general_form_release_and_origin_conflict() {
        let req = PinRequest {
            originator: Some("Debian".into()),
            origin: Some("deb.debian.org".into()),
            ..PinRequest::new("all")
        };
        assert!(matches!(req.validate(), Err(Error::MutualExclusion(_))));
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let req = PinRequest {
            release: Some("stable".into()),
            origin: Some(String::new()),
            version: Some(String::new()),
            ..specific("a")
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_packages_rejected() {
        for packages in [
            Packages::Many(Vec::new()),
            Packages::One(String::new()),
            Packages::Many(vec!["nginx".into(), " ".into()]),
        ] {
            let req = PinRequest { packages, ..PinRequest::new("x") };
            assert!(matches!(req.validate(), Err(Error::InvalidParameter(_))), "{:?}", req);
        }
    }

    #[test]
    fn test_line_breaks_rejected() {
        let cases = [
            PinRequest { packages: "nginx\nPin-Priority: 1001".into(), ..PinRequest::new("a") },
            PinRequest { priority: Priority::Text("500\nPackage: *".into()), ..PinRequest::new("b") },
            PinRequest { release: Some("stable\r".into()), ..PinRequest::new("c") },
            PinRequest { codename: Some("book\tworm".into()), ..PinRequest::new("d") },
            PinRequest::new("e\nPin: release a=unstable"),
        ];
        for req in cases {
            assert!(matches!(req.validate(), Err(Error::InvalidParameter(_))), "{:?}", req);
        }
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("700".parse::<Priority>().unwrap(), Priority::Int(700));
        assert_eq!("-10".parse::<Priority>().unwrap(), Priority::Int(-10));
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::Text("high".into()));
    }

    #[test]
    fn test_ensure_parse() {
        assert_eq!("file".parse::<Ensure>().unwrap(), Ensure::File);
        assert!(Ensure::File.is_present());
        assert!(!Ensure::Absent.is_present());
        assert!("gone".parse::<Ensure>().is_err());
    }
}
