//! Client for the `adb` command-line tool.
//!
//! Every device operation is one `adb` invocation through a
//! [`ShellExecutor`]. Text output passes through [`decode`] before it is
//! parsed; file contents are returned as raw bytes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::decode::decode;
use crate::listing::{parse_listing, FileEntry};
use crate::ports::shell::{ShellError, ShellExecutor};

/// Which `adb` binary to run and which device to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbConfig {
    /// Path or name of the adb executable.
    pub adb_path: String,
    /// Device serial passed as `-s`; `None` lets adb pick the only device.
    pub serial: Option<String>,
}

impl Default for AdbConfig {
    fn default() -> Self {
        Self { adb_path: "adb".to_string(), serial: None }
    }
}

/// Errors from running adb commands.
#[derive(Debug, thiserror::Error)]
pub enum AdbError {
    /// The adb process could not be run.
    #[error(transparent)]
    Shell(#[from] ShellError),
    /// adb ran but exited unsuccessfully.
    #[error("adb exited with status {exit_code}: {stderr}")]
    CommandFailed {
        /// Process exit code.
        exit_code: i32,
        /// Decoded standard error, trimmed.
        stderr: String,
    },
    /// The listing contained no entry for the path.
    #[error("no such file on device: {0}")]
    NotFound(String),
}

/// A device reachable through adb.
pub struct Adb {
    config: AdbConfig,
    shell: Arc<dyn ShellExecutor>,
}

impl Adb {
    /// Creates a client that runs adb through `shell`.
    pub fn new(config: AdbConfig, shell: Arc<dyn ShellExecutor>) -> Self {
        Self { config, shell }
    }

    /// Full adb argument list for `tail`, with the device selector prepended.
    #[must_use]
    pub fn command_args(&self, tail: &[&str]) -> Vec<String> {
        let mut args = Vec::with_capacity(tail.len() + 2);
        if let Some(serial) = &self.config.serial {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
        args.extend(tail.iter().map(|arg| (*arg).to_string()));
        args
    }

    /// Runs adb and returns its raw standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if adb cannot be run or exits with a non-zero status.
    pub fn output_bytes(&self, tail: &[&str]) -> Result<Vec<u8>, AdbError> {
        let args = self.command_args(tail);
        debug!(adb = %self.config.adb_path, ?args, "running adb");
        let output = self.shell.run(&self.config.adb_path, &args)?;
        if !output.success() {
            let stderr = decode(&output.stderr).trim().to_string();
            warn!(exit_code = output.exit_code, %stderr, "adb command failed");
            return Err(AdbError::CommandFailed { exit_code: output.exit_code, stderr });
        }
        Ok(output.stdout)
    }

    /// Runs adb and returns its standard output decoded as text.
    ///
    /// # Errors
    ///
    /// Returns an error if adb cannot be run or exits with a non-zero status.
    /// Decoding itself never fails.
    pub fn check_output(&self, tail: &[&str]) -> Result<String, AdbError> {
        self.output_bytes(tail).map(|stdout| decode(&stdout))
    }

    /// Lists the entries of a directory, excluding `.` and `..`.
    ///
    /// # Errors
    ///
    /// Returns an error if the adb command fails.
    pub fn list_dir(&self, path: &str) -> Result<Vec<FileEntry>, AdbError> {
        let dir = format!("{}/", path.trim_end_matches('/'));
        let text = self.check_output(&["shell", "ls", "-l", "-a", &quote(&dir)])?;
        Ok(parse_listing(&text)
            .into_iter()
            .filter(|entry| entry.name() != "." && entry.name() != "..")
            .collect())
    }

    /// Looks up a single path without following it if it is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`AdbError::NotFound`] if the listing has no parseable entry,
    /// or an error if the adb command fails.
    pub fn stat(&self, path: &str) -> Result<FileEntry, AdbError> {
        let text = self.check_output(&["shell", "ls", "-l", "-d", &quote(path)])?;
        parse_listing(&text).into_iter().next().ok_or_else(|| AdbError::NotFound(path.to_string()))
    }

    /// Reads a file's contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the adb command fails.
    pub fn cat(&self, path: &str) -> Result<Vec<u8>, AdbError> {
        self.output_bytes(&["exec-out", "cat", &quote(path)])
    }
}

/// Single-quotes `path` for the device shell.
#[must_use]
pub fn quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}
