// src/cli/pin.rs
//! Pin parameters given on the command line

use aptpin::{Ensure, Packages, PinRequest, Priority};
use clap::Args;

#[derive(Args, Clone, Debug)]
pub struct PinArgs {
    /// Pin name (also the source of the file name)
    pub name: String,

    /// Package match; repeat for several packages
    #[arg(short, long = "package", default_value = "*")]
    pub packages: Vec<String>,

    /// Pin priority (integer or string)
    #[arg(short = 'P', long, default_value = "0")]
    pub priority: Priority,

    /// Desired state: file, present, absent
    #[arg(long, default_value = "present")]
    pub ensure: Ensure,

    /// Load order among preference files
    #[arg(long, default_value_t = aptpin::pin::DEFAULT_ORDER)]
    pub order: u32,

    /// Explanation comment (default: "<caller>: <name>")
    #[arg(long)]
    pub explanation: Option<String>,

    /// Release archive (a=)
    #[arg(long)]
    pub release: Option<String>,

    /// Origin host
    #[arg(long)]
    pub origin: Option<String>,

    /// Package version (not allowed with the `*` package match)
    #[arg(long)]
    pub version: Option<String>,

    /// Release codename (n=)
    #[arg(long)]
    pub codename: Option<String>,

    /// Release version (v=)
    #[arg(long)]
    pub release_version: Option<String>,

    /// Archive component (c=)
    #[arg(long)]
    pub component: Option<String>,

    /// Release originator (o=)
    #[arg(long)]
    pub originator: Option<String>,

    /// Release label (l=)
    #[arg(long)]
    pub label: Option<String>,
}

impl PinArgs {
    pub fn into_request(self) -> PinRequest {
        let packages = match <[String; 1]>::try_from(self.packages) {
            Ok([single]) => Packages::One(single),
            Err(list) => Packages::Many(list),
        };

        PinRequest {
            name: self.name,
            ensure: self.ensure,
            explanation: self.explanation,
            order: self.order,
            packages,
            priority: self.priority,
            release: self.release,
            origin: self.origin,
            version: self.version,
            codename: self.codename,
            release_version: self.release_version,
            component: self.component,
            originator: self.originator,
            label: self.label,
        }
    }
}
