// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so rendered files and JSON stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            pin,
            caller,
            show_path,
        }) => commands::cmd_render(pin.into_request(), &caller, show_path),
        Some(Commands::Apply {
            config,
            root,
            dry_run,
            purge,
        }) => commands::cmd_apply(&config.config, &root.root, dry_run, purge),
        Some(Commands::Check { config }) => commands::cmd_check(&config.config),
        Some(Commands::Facts { root }) => commands::cmd_facts(&root.root),
        None => {
            // No command provided, show help
            println!("aptpin v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'aptpin --help' for usage information");
            Ok(())
        }
    }
}
