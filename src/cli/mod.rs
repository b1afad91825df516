// src/cli/mod.rs
//! CLI definitions for aptpin
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `render` - Validate one pin given on the command line and print its file
//! - `apply` - Converge every pin in the configuration file
//! - `check` - Validate the configuration file without writing anything
//! - `facts` - Print host facts as JSON

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod pin;

pub use pin::PinArgs;

#[derive(Parser)]
#[command(name = "aptpin")]
#[command(author = "aptpin Contributors")]
#[command(version)]
#[command(about = "Manage APT pin files and report reboot-required status", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Path to the pin configuration file
#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Pin configuration file
    #[arg(short, long, default_value = aptpin::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Filesystem root to operate on
#[derive(Args, Clone, Debug)]
pub struct RootArgs {
    /// Root directory (use a non-/ path to manage a mounted target)
    #[arg(short, long, default_value = "/")]
    pub root: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a single pin and print the rendered preferences file
    Render {
        #[command(flatten)]
        pin: PinArgs,

        /// Identity used in the default explanation ("<caller>: <name>")
        #[arg(long, default_value = "")]
        caller: String,

        /// Also print the path the file would be written to
        #[arg(long)]
        show_path: bool,
    },

    /// Write, update or remove every pin in the configuration file
    Apply {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        root: RootArgs,

        /// Show what would change without touching the filesystem
        #[arg(long)]
        dry_run: bool,

        /// Remove preferences.d files no pin manages
        #[arg(long)]
        purge: bool,
    },

    /// Validate the configuration file
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print host facts as JSON
    Facts {
        #[command(flatten)]
        root: RootArgs,
    },
}
