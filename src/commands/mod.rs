// src/commands/mod.rs
//! Command handlers for the aptpin CLI

mod apply;
mod check;
mod facts;
mod render;

pub use apply::cmd_apply;
pub use check::cmd_check;
pub use facts::cmd_facts;
pub use render::cmd_render;
