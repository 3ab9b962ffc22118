//! Core library entry for the `adbfs` CLI.
//!
//! Lists and reads files on an Android device by running `adb`, decoding its
//! output with [`decode::decode`] (UTF-8, falling back to Latin-1 for the
//! whole output) and parsing the result into [`listing::FileEntry`] values.

pub mod adapters;
pub mod adb;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod context;
pub mod decode;
pub mod listing;
pub mod logging;
pub mod ports;
pub mod remote_fs;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli)
}
