//! Command-line argument parsing for the demo

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::platform::OsClass;

/// Platform choices accepted by `--platform`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Mac,
    NonMac,
    Any,
}

impl From<PlatformArg> for OsClass {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Mac => OsClass::Mac,
            PlatformArg::NonMac => OsClass::NonMac,
            PlatformArg::Any => OsClass::Any,
        }
    }
}

/// Keyboard-driven sketch pad with OS-aware shortcuts
#[derive(Parser, Debug)]
#[command(
    name = "sketch-keys",
    version,
    about = "Keyboard-driven sketch pad with OS-aware shortcuts"
)]
pub struct CliArgs {
    /// Use Mac or non-Mac shortcuts regardless of the running OS
    #[arg(long, value_enum, value_name = "OS")]
    pub platform: Option<PlatformArg>,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the shortcut listing and exit without opening a window
    #[arg(long)]
    pub print_usage: bool,

    /// Separator between lines of the shortcut listing
    #[arg(long, value_name = "STR")]
    pub separator: Option<String>,
}

impl CliArgs {
    /// Platform override from the command line; `any` clears the override
    pub fn platform_override(&self) -> Option<Option<OsClass>> {
        self.platform.map(|arg| match OsClass::from(arg) {
            OsClass::Any => None,
            os => Some(os),
        })
    }
}
