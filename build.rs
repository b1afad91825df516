// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: pin configuration file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .default_value("/etc/aptpin/pins.toml")
        .help("Pin configuration file")
}

/// Common argument: filesystem root
fn root_arg() -> Arg {
    Arg::new("root")
        .short('r')
        .long("root")
        .default_value("/")
        .help("Root directory")
}

fn build_cli() -> Command {
    Command::new("aptpin")
        .version(env!("CARGO_PKG_VERSION"))
        .author("aptpin Contributors")
        .about("Manage APT pin files and report reboot-required status")
        .subcommand_required(false)
        .subcommand(
            Command::new("render")
                .about("Validate a single pin and print the rendered preferences file")
                .arg(Arg::new("name").required(true).help("Pin name"))
                .arg(
                    Arg::new("package")
                        .short('p')
                        .long("package")
                        .action(ArgAction::Append)
                        .help("Package match; repeat for several packages"),
                )
                .arg(Arg::new("priority").short('P').long("priority").help("Pin priority"))
                .arg(Arg::new("ensure").long("ensure").help("Desired state: file, present, absent"))
                .arg(Arg::new("order").long("order").help("Load order among preference files"))
                .arg(Arg::new("explanation").long("explanation").help("Explanation comment"))
                .arg(Arg::new("release").long("release").help("Release archive (a=)"))
                .arg(Arg::new("origin").long("origin").help("Origin host"))
                .arg(Arg::new("version").long("version").help("Package version"))
                .arg(Arg::new("codename").long("codename").help("Release codename (n=)"))
                .arg(
                    Arg::new("release_version")
                        .long("release-version")
                        .help("Release version (v=)"),
                )
                .arg(Arg::new("component").long("component").help("Archive component (c=)"))
                .arg(Arg::new("originator").long("originator").help("Release originator (o=)"))
                .arg(Arg::new("label").long("label").help("Release label (l=)"))
                .arg(Arg::new("caller").long("caller").help("Identity used in the default explanation"))
                .arg(
                    Arg::new("show_path")
                        .long("show-path")
                        .action(ArgAction::SetTrue)
                        .help("Also print the path the file would be written to"),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Write, update or remove every pin in the configuration file")
                .arg(config_arg())
                .arg(root_arg())
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show what would change without touching the filesystem"),
                )
                .arg(
                    Arg::new("purge")
                        .long("purge")
                        .action(ArgAction::SetTrue)
                        .help("Remove preferences.d files no pin manages"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate the configuration file")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("facts")
                .about("Print host facts as JSON")
                .arg(root_arg()),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("aptpin.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
