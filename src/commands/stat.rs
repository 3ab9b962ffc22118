//! `stat`: show attributes of one remote path.

use std::io::Write;

use super::format_time;
use crate::remote_fs::RemoteFs;

/// Prints kind, mode, size and modification time of `path`.
///
/// # Errors
///
/// Returns an error string if the path cannot be looked up or output fails.
pub fn run(fs: &RemoteFs, path: &str, out: &mut impl Write) -> Result<(), String> {
    let attr = fs.getattr(path).map_err(|e| e.to_string())?;
    writeln!(out, "  File: {path}").map_err(|e| e.to_string())?;
    writeln!(out, "  Type: {}", attr.kind).map_err(|e| e.to_string())?;
    writeln!(out, "  Mode: {:06o}", attr.mode).map_err(|e| e.to_string())?;
    writeln!(out, "  Size: {}", attr.size).map_err(|e| e.to_string())?;
    writeln!(out, "Modify: {}", format_time(attr.modified)).map_err(|e| e.to_string())?;
    Ok(())
}
