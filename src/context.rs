//! Service context selecting the shell adapter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::RecordingShellExecutor;
use crate::adapters::replaying::ReplayingShellExecutor;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::cassette::{self, CassetteError};
use crate::ports::shell::ShellExecutor;

/// Environment variable naming a cassette to record shell interactions to.
pub const RECORD_ENV: &str = "ADBFS_RECORD";
/// Environment variable naming a cassette to replay shell interactions from.
pub const REPLAY_ENV: &str = "ADBFS_REPLAY";

/// Bundles the port trait objects the commands run against.
pub struct ServiceContext {
    /// Shell executor for running adb.
    pub shell: Arc<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a live context that runs real processes.
    #[must_use]
    pub fn live() -> Self {
        Self { shell: Arc::new(LiveShellExecutor) }
    }

    /// Creates a live context whose shell interactions are recorded to `path`.
    ///
    /// The cassette is written by [`RecordingSession::finish`] once the
    /// context has been dropped.
    #[must_use]
    pub fn recording_at(path: PathBuf) -> (Self, RecordingSession) {
        let session = RecordingSession::new(path);
        let shell =
            RecordingShellExecutor::new(Box::new(LiveShellExecutor), Arc::clone(&session.shell));
        (Self { shell: Arc::new(shell) }, session)
    }

    /// Creates a context that serves shell interactions from a cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, CassetteError> {
        let cassette = cassette::load(path)?;
        Ok(Self { shell: Arc::new(ReplayingShellExecutor::new(CassetteReplayer::new(&cassette))) })
    }

    /// Picks replay, recording or live mode from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if both modes are requested or the replay cassette
    /// cannot be loaded.
    pub fn from_env() -> Result<(Self, Option<RecordingSession>), String> {
        let record = std::env::var_os(RECORD_ENV);
        let replay = std::env::var_os(REPLAY_ENV);
        match (record, replay) {
            (Some(_), Some(_)) => {
                Err(format!("{RECORD_ENV} and {REPLAY_ENV} are mutually exclusive"))
            }
            (None, Some(path)) => {
                Ok((Self::replaying(Path::new(&path)).map_err(|e| e.to_string())?, None))
            }
            (Some(path), None) => {
                let (ctx, session) = Self::recording_at(PathBuf::from(path));
                Ok((ctx, Some(session)))
            }
            (None, None) => Ok((Self::live(), None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn replaying_context_serves_cassette() {
        let dir = std::env::temp_dir().join("adbfs_ctx_replay_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ls.cassette.yaml");
        let cassette = Cassette {
            name: "ls".into(),
            recorded_at: Utc::now(),
            interactions: vec![Interaction {
                seq: 0,
                port: "shell".into(),
                method: "run".into(),
                input: json!({"program": "adb", "args": ["shell", "ls"]}),
                output: json!({"Ok": {"exit_code": 0, "stdout": [0xe2, 0x0a], "stderr": []}}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let output = ctx.shell.run("adb", &["shell".to_string(), "ls".to_string()]).unwrap();
        assert_eq!(output.stdout, b"\xe2\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn recording_context_writes_after_drop() {
        let dir = std::env::temp_dir().join("adbfs_ctx_record_test");
        let path = dir.join("echo.cassette.yaml");

        let (ctx, session) = ServiceContext::recording_at(path.clone());
        ctx.shell.run("sh", &["-c".to_string(), "echo hi".to_string()]).unwrap();
        drop(ctx);
        session.finish().unwrap();

        let cassette = cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions[0].output["Ok"]["stdout"], json!(b"hi\n".to_vec()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
