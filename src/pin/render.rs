// src/pin/render.rs

//! Rendering of pin requests into APT preference stanzas

use super::PinRequest;
use crate::error::Result;
use crate::setting::{Setting, SettingType};
use tracing::debug;

/// Header shared by every file aptpin manages
pub const HEADER: &str = "# This file is managed by aptpin. DO NOT EDIT.\n";

/// Output of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPin {
    /// Sanitized file name stem
    pub file_name: String,
    /// Explanation after default resolution
    pub explanation: String,
    /// Directive handed to the setting writer
    pub setting: Setting,
}

impl RenderedPin {
    /// Full file content (header + stanza)
    pub fn content(&self) -> &str {
        &self.setting.content
    }
}

/// Validate and render a pin request
///
/// `caller` is the identity used in the default explanation
/// (`"<caller>: <name>"`); pass `""` when there is none.
pub fn render_pin(request: &PinRequest, caller: &str) -> Result<RenderedPin> {
    request.validate()?;

    let explanation = match &request.explanation {
        Some(text) => text.clone(),
        None => format!("{}: {}", caller, request.name),
    };
    let file_name = request.file_name();

    let mut content = String::from(HEADER);
    content.push_str(&render_body(request, &explanation));

    debug!(
        "Rendered pin '{}' as pref-{} ({} bytes)",
        request.name,
        file_name,
        content.len()
    );

    let setting = Setting {
        setting_type: SettingType::Pref,
        name: file_name.clone(),
        ensure: request.ensure,
        order: request.order,
        content,
        notify_update: false,
    };
    setting.validate()?;

    Ok(RenderedPin {
        file_name,
        explanation,
        setting,
    })
}

fn render_body(request: &PinRequest, explanation: &str) -> String {
    let mut body = String::new();
    for line in explanation.lines() {
        body.push_str("Explanation: ");
        body.push_str(line);
        body.push('\n');
    }
    if explanation.is_empty() {
        body.push_str("Explanation: \n");
    }
    body.push_str(&format!("Package: {}\n", request.packages_string()));
    body.push_str(&format!("Pin: {}\n", pin_expression(request)));
    body.push_str(&format!("Pin-Priority: {}\n", request.priority));
    body
}

/// The value of the `Pin:` line
fn pin_expression(request: &PinRequest) -> String {
    if !request.pin_release().is_empty() {
        let options: Vec<String> = [
            ("a", &request.release),
            ("n", &request.codename),
            ("v", &request.release_version),
            ("c", &request.component),
            ("o", &request.originator),
            ("l", &request.label),
        ]
        .into_iter()
        .filter_map(|(key, field)| PinRequest::target(field).map(|v| format!("{}={}", key, v)))
        .collect();
        format!("release {}", options.join(", "))
    } else if let Some(version) = PinRequest::target(&request.version) {
        format!("version {}", version)
    } else if let Some(origin) = PinRequest::target(&request.origin) {
        format!("origin {}", origin)
    } else {
        format!("release a={}", request.name)
    }
}
