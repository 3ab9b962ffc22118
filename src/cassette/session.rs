//! Recording session owning the shell cassette recorder.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::recorder::CassetteRecorder;

/// Holds the recorder shared with a recording adapter until the command
/// finishes, then writes the cassette.
pub struct RecordingSession {
    /// Recorder for shell interactions.
    pub shell: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Create a session that will write to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.file_stem().map_or_else(
            || "adbfs-session".to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        Self { shell: Arc::new(Mutex::new(CassetteRecorder::new(path, name))) }
    }

    /// Write the cassette to disk.
    ///
    /// Every adapter holding the recorder must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be
    /// written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.shell)
            .map_err(|_| "Recording adapter for shell still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock for shell poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write shell cassette: {e}"))
    }
}
