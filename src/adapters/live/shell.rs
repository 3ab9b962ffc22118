//! Live shell executor using `std::process::Command`.

use std::process::Command;

use tracing::debug;

use crate::ports::shell::{CommandOutput, ShellError, ShellExecutor};

/// Live executor that spawns programs directly, without an intermediate shell.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ShellError> {
        debug!(program, ?args, "spawning");
        let output = Command::new(program).args(args).output().map_err(|source| {
            ShellError::Spawn { program: program.to_string(), source }
        })?;
        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
