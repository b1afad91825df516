// src/lib.rs

//! aptpin: APT pin management
//!
//! Validates and renders APT pin requests into `/etc/apt/preferences.d`
//! stanzas, converges the resulting files idempotently, and reports whether
//! a Debian-family host needs a reboot.
//!
//! # Architecture
//!
//! - `pin`: request model, mutual-exclusion validation, stanza rendering
//! - `setting`: maps settings onto APT config files and writes them only
//!   when their content hash differs
//! - `facts`: OS-family-confined host facts (`apt_reboot_required`)
//! - `config`: TOML file listing the pins to manage
//! - `apply`: converges a whole configuration, with optional purge

pub mod apply;
pub mod config;
mod error;
pub mod facts;
pub mod hash;
pub mod pin;
pub mod setting;

pub use apply::{apply_config, ApplySummary};
pub use config::{load_config, PinConfig, DEFAULT_CONFIG_PATH};
pub use error::{Error, Result};
pub use facts::{collect_facts, reboot_required, Facts, OsFamily, RebootRequiredFact};
pub use pin::{render_pin, Ensure, Packages, PinRequest, Priority, RenderedPin};
pub use setting::{ApplyOutcome, ApplyReport, Setting, SettingType, SettingWriter};
