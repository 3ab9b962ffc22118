//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `adbfs`.
#[derive(Debug, Parser)]
#[command(name = "adbfs", version, about = "Browse an Android device's files over adb")]
pub struct Cli {
    /// Path to the adb executable.
    #[arg(long, env = "ADB", default_value = "adb", global = true)]
    pub adb: String,
    /// Serial of the device to talk to.
    #[arg(short, long, env = "ANDROID_SERIAL", global = true)]
    pub serial: Option<String>,
    /// Log adb invocations and decoding decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a directory on the device.
    Ls {
        /// Remote directory.
        #[arg(default_value = "/")]
        path: String,
    },
    /// Show attributes of a remote path.
    Stat {
        /// Remote path.
        path: String,
    },
    /// Write a remote file to stdout.
    Cat {
        /// Remote file.
        path: String,
    },
}
