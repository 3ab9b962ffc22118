//! Cassette files for recording and replaying device interactions.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

use std::path::Path;

use format::Cassette;

/// Failure to read or write a cassette file.
#[derive(Debug, thiserror::Error)]
pub enum CassetteError {
    /// The file could not be read or written.
    #[error("cassette {path}: {source}")]
    Io {
        /// The cassette path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid cassette.
    #[error("cassette {path}: {source}")]
    Yaml {
        /// The cassette path.
        path: String,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Loads a cassette from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Cassette, CassetteError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| CassetteError::Io { path: path.display().to_string(), source })?;
    serde_yaml::from_str(&content)
        .map_err(|source| CassetteError::Yaml { path: path.display().to_string(), source })
}
