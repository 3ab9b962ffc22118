//! `cat`: copy a remote file to stdout.

use std::io::Write;

use crate::remote_fs::RemoteFs;

/// Writes the raw contents of `path` to `out`.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or output fails.
pub fn run(fs: &RemoteFs, path: &str, out: &mut impl Write) -> Result<(), String> {
    let contents = fs.read(path, 0, usize::MAX).map_err(|e| e.to_string())?;
    out.write_all(&contents).map_err(|e| e.to_string())
}
