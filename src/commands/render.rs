// src/commands/render.rs

//! Render a single pin from command-line parameters

use anyhow::{Context, Result};
use aptpin::{render_pin, PinRequest, SettingWriter};
use std::path::Path;

/// Validate a pin and print its file content to stdout
pub fn cmd_render(request: PinRequest, caller: &str, show_path: bool) -> Result<()> {
    let rendered = render_pin(&request, caller)
        .with_context(|| format!("Invalid pin '{}'", request.name))?;

    if show_path {
        let path = SettingWriter::new(Path::new("/")).target_path(&rendered.setting);
        println!("# {} ({})", path.display(), rendered.setting.ensure);
    }
    print!("{}", rendered.content());
    Ok(())
}
