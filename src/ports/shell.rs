//! Shell executor port for running external commands.

use serde::{Deserialize, Serialize};

/// The captured result of one external command.
///
/// Output streams are kept as raw bytes; decoding them is the caller's
/// concern (see [`crate::decode`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// The exit code of the process, or `-1` if it was killed by a signal.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: Vec<u8>,
    /// The captured standard error.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Returns `true` if the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Failure to obtain a command's output at all.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The program could not be spawned or waited on.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The program that was being launched.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A recorded failure served back from a cassette.
    #[error("{0}")]
    Replayed(String),
}

/// Executes external programs.
///
/// Abstracting execution allows deterministic replay by recording and
/// replaying command outputs during cassette playback.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args` to completion and returns its output.
    ///
    /// A non-zero exit status is not an error at this layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or fails to execute.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ShellError>;
}
