//! Command dispatch and handlers.

pub mod cat;
pub mod ls;
pub mod stat;

use std::io::Write;

use chrono::NaiveDateTime;

use crate::adb::{Adb, AdbConfig};
use crate::cli::{Cli, Command};
use crate::context::ServiceContext;
use crate::remote_fs::RemoteFs;

/// Dispatch a parsed command to its handler.
///
/// When `ADBFS_RECORD` is set to a file path, every adb invocation is
/// recorded to that cassette; `ADBFS_REPLAY` serves them back instead of
/// running adb.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let (ctx, session) = ServiceContext::from_env()?;

    let result = dispatch_with_context(cli, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        drop(ctx);
        let path = session.finish()?;
        eprintln!("Recording saved to: {}", path.display());
    }

    result
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<(), String> {
    let config = AdbConfig { adb_path: cli.adb.clone(), serial: cli.serial.clone() };
    let fs = RemoteFs::new(Adb::new(config, ctx.shell.clone()));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Command::Ls { path } => ls::run(&fs, path, &mut out),
        Command::Stat { path } => stat::run(&fs, path, &mut out),
        Command::Cat { path } => cat::run(&fs, path, &mut out),
    };
    out.flush().map_err(|e| e.to_string())?;
    result
}

/// Formats a listing timestamp, or `-` when unknown.
pub(crate) fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}
