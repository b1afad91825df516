// src/config.rs

//! Pin configuration file
//!
//! # Example pins.toml
//!
//! ```toml
//! [options]
//! # Identity used in default explanations ("<namespace>: <name>")
//! namespace = "myapp"
//! # Remove preferences.d files that no pin manages
//! purge = false
//!
//! [[pin]]
//! name = "stable-pin"
//! packages = "*"
//! priority = 700
//! release = "stable"
//!
//! [[pin]]
//! name = "nginx"
//! packages = ["nginx", "nginx-common"]
//! version = "1.24.*"
//! priority = 1001
//! order = 10
//! ```

use crate::error::{Error, Result};
use crate::pin::{render_pin, PinRequest, RenderedPin};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default path for the pin configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/aptpin/pins.toml";

/// Global options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Caller identity for default explanations
    #[serde(default)]
    pub namespace: String,

    /// Remove unmanaged files from preferences.d on apply
    #[serde(default)]
    pub purge: bool,
}

/// The whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinConfig {
    #[serde(default)]
    pub options: Options,

    #[serde(default, rename = "pin")]
    pub pins: Vec<PinRequest>,
}

impl PinConfig {
    /// Parse a configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render every pin, failing on the first invalid one
    ///
    /// Two pins sharing a setting title (`pref-<file name>`) are rejected,
    /// whatever their order.
    pub fn render_all(&self) -> Result<Vec<RenderedPin>> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        let mut rendered = Vec::with_capacity(self.pins.len());

        for pin in &self.pins {
            let out = render_pin(pin, &self.options.namespace)?;
            let title = out.setting.title();
            if let Some(other) = seen.insert(title.clone(), &pin.name) {
                return Err(Error::ConfigError(format!(
                    "pins '{}' and '{}' both declare {}",
                    other, pin.name, title
                )));
            }
            rendered.push(out);
        }

        Ok(rendered)
    }

    /// Validate every pin without keeping the rendered output
    pub fn validate(&self) -> Result<()> {
        self.render_all().map(|_| ())
    }
}

/// Load a configuration file
pub fn load_config(path: &Path) -> Result<PinConfig> {
    let content = fs::read_to_string(path)?;
    let config = PinConfig::parse(&content)?;
    debug!(
        "Loaded {} pin(s) from {}",
        config.pins.len(),
        path.display()
    );
    Ok(config)
}
