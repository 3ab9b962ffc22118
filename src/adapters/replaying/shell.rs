//! Replaying adapter for the `ShellExecutor` port.

use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::shell::{CommandOutput, ShellError, ShellExecutor};

/// Replays recorded shell command results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ShellError> {
        let interaction = self
            .replayer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_interaction("shell", "run");
        let recorded: Option<Vec<String>> =
            serde_json::from_value(interaction.input["args"].clone()).ok();
        if recorded.as_deref().is_some_and(|recorded| recorded != args) {
            warn!(program, ?args, ?recorded, "replayed command differs from recording");
        }
        replay_result(&interaction.output).map_err(ShellError::Replayed)
    }
}
