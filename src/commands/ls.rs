//! `ls`: list a remote directory.

use std::io::Write;

use super::format_time;
use crate::remote_fs::RemoteFs;

/// Prints one line per entry of `path`: type, mode, size, time, name.
///
/// # Errors
///
/// Returns an error string if the directory cannot be listed or output fails.
pub fn run(fs: &RemoteFs, path: &str, out: &mut impl Write) -> Result<(), String> {
    let names = fs.readdir(path).map_err(|e| e.to_string())?;
    let base = path.trim_end_matches('/');
    for name in names {
        let attr = fs.getattr(&format!("{base}/{name}")).map_err(|e| e.to_string())?;
        writeln!(
            out,
            "{} {:04o} {:>10} {} {name}",
            attr.kind.tag(),
            attr.mode & 0o7777,
            attr.size,
            format_time(attr.modified),
        )
        .map_err(|e| e.to_string())?;
    }
    Ok(())
}
