// src/setting/mod.rs

//! APT setting files
//!
//! A setting is one file under the APT configuration tree. Its title
//! carries the kind of file as a prefix:
//!
//! | Title prefix | Directory                | Extension |
//! |--------------|--------------------------|-----------|
//! | `conf-`      | `/etc/apt/apt.conf.d`    | (none)    |
//! | `pref-`      | `/etc/apt/preferences.d` | `.pref`   |
//! | `list-`      | `/etc/apt/sources.list.d`| `.list`   |
//!
//! The on-disk name is `<order>-<name><ext>`, with `order` zero-padded to
//! two digits so that lexical and numeric load order agree below 100.
//! Files are converged by [`SettingWriter`].

mod writer;

pub use writer::{ApplyOutcome, ApplyReport, SettingWriter};

use crate::error::{Error, Result};
use crate::pin::{Ensure, DEFAULT_ORDER};
use std::fmt;
use std::path::PathBuf;

/// Kind of APT setting file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingType {
    Conf,
    Pref,
    List,
}

impl SettingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::Conf => "conf",
            SettingType::Pref => "pref",
            SettingType::List => "list",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "conf" => Some(SettingType::Conf),
            "pref" => Some(SettingType::Pref),
            "list" => Some(SettingType::List),
            _ => None,
        }
    }

    /// Directory relative to the filesystem root
    pub fn directory(&self) -> &'static str {
        match self {
            SettingType::Conf => "etc/apt/apt.conf.d",
            SettingType::Pref => "etc/apt/preferences.d",
            SettingType::List => "etc/apt/sources.list.d",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SettingType::Conf => "",
            SettingType::Pref => ".pref",
            SettingType::List => ".list",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Desired state of one setting file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub setting_type: SettingType,
    /// Base name, without order prefix or extension
    pub name: String,
    pub ensure: Ensure,
    /// Load order prefix
    pub order: u32,
    pub content: String,
    /// Request a package index refresh when the file changes
    pub notify_update: bool,
}

impl Setting {
    /// Build a setting from a prefixed title such as `pref-nginx`
    pub fn from_title(title: &str, content: impl Into<String>) -> Result<Self> {
        let (prefix, name) = title.split_once('-').ok_or_else(|| {
            Error::InvalidParameter(format!(
                "setting title '{}' must start with conf-, pref- or list-",
                title
            ))
        })?;
        let setting_type = SettingType::parse(prefix).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "setting title '{}' must start with conf-, pref- or list-",
                title
            ))
        })?;

        let setting = Self {
            setting_type,
            name: name.to_string(),
            ensure: Ensure::default(),
            order: DEFAULT_ORDER,
            content: content.into(),
            notify_update: true,
        };
        setting.validate()?;
        Ok(setting)
    }

    /// Prefixed title, e.g. `pref-nginx`
    pub fn title(&self) -> String {
        format!("{}-{}", self.setting_type, self.name)
    }

    /// On-disk file name, e.g. `50-nginx.pref`
    pub fn file_name(&self) -> String {
        format!(
            "{:02}-{}{}",
            self.order,
            self.name,
            self.setting_type.extension()
        )
    }

    /// Path relative to the filesystem root
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.setting_type.directory()).join(self.file_name())
    }

    /// APT only reads files whose names are made of `[0-9A-Za-z\-_.]`
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "setting '{}' has an empty name",
                self.title()
            )));
        }
        let valid = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.';
        if !self.name.chars().all(valid) || self.name == "." || self.name == ".." {
            return Err(Error::InvalidParameter(format!(
                "setting name '{}' contains characters APT will not read",
                self.name
            )));
        }
        Ok(())
    }
}
