//! Read-only, path-oriented view of the device filesystem.
//!
//! Shaped after the callbacks a FUSE layer needs (`readdir`, `getattr`,
//! `read`) so a mount front end can sit directly on top of it.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::adb::{Adb, AdbError};
use crate::listing::{FileEntry, FileKind};

/// Attributes of one remote path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttr {
    /// File type.
    pub kind: FileKind,
    /// Size in bytes.
    pub size: u64,
    /// Full `st_mode`.
    pub mode: u32,
    /// Modification time, if known.
    pub modified: Option<NaiveDateTime>,
}

impl From<&FileEntry> for FileAttr {
    fn from(entry: &FileEntry) -> Self {
        Self {
            kind: entry.kind,
            size: entry.size,
            mode: entry.mode(),
            modified: Some(entry.modified),
        }
    }
}

/// Errors surfaced to filesystem callers.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// The path does not exist.
    #[error("{0}: no such file or directory")]
    NotFound(String),
    /// A directory operation was applied to something else.
    #[error("{0}: not a directory")]
    NotADirectory(String),
    /// The device could not be queried.
    #[error(transparent)]
    Device(AdbError),
}

impl FsError {
    /// The errno a mount layer should report.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::NotFound(_) => 2,
            Self::NotADirectory(_) => 20,
            Self::Device(_) => 5,
        }
    }
}

impl From<AdbError> for FsError {
    fn from(err: AdbError) -> Self {
        match err {
            AdbError::NotFound(path) => Self::NotFound(path),
            other => Self::Device(other),
        }
    }
}

/// Filesystem facade over an [`Adb`] client with a per-directory listing cache.
///
/// The contents of the most recently read file are kept as well, so chunked
/// reads of one file cost a single `cat`.
pub struct RemoteFs {
    adb: Adb,
    listings: Mutex<HashMap<String, Vec<FileEntry>>>,
    last_read: Mutex<Option<(String, Vec<u8>)>>,
}

impl RemoteFs {
    /// Wraps `adb` with an empty cache.
    pub fn new(adb: Adb) -> Self {
        Self { adb, listings: Mutex::new(HashMap::new()), last_read: Mutex::new(None) }
    }

    /// Names in directory `path`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotADirectory`] if `path` is not a directory, or a
    /// lookup error. A symbolic link is listed when its target is a directory.
    pub fn readdir(&self, path: &str) -> Result<Vec<String>, FsError> {
        let path = normalize(path);
        let cached =
            self.listings.lock().unwrap_or_else(PoisonError::into_inner).contains_key(&path);
        if !cached && !self.is_directory(&path)? {
            return Err(FsError::NotADirectory(path));
        }
        let mut names: Vec<String> =
            self.listing(&path)?.iter().map(|entry| entry.name().to_string()).collect();
        names.sort();
        Ok(names)
    }

    /// Attributes of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if the path does not exist, or
    /// [`FsError::Device`] if adb fails.
    pub fn getattr(&self, path: &str) -> Result<FileAttr, FsError> {
        let path = normalize(path);
        if path == "/" {
            return Ok(FileAttr {
                kind: FileKind::Directory,
                size: 0,
                mode: FileKind::Directory.type_bits() | 0o755,
                modified: None,
            });
        }

        let (parent, name) = split_parent(&path);
        let cached = self
            .listings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(parent)
            .map(|entries| entries.iter().find(|entry| entry.name() == name).map(FileAttr::from));
        match cached {
            Some(Some(attr)) => Ok(attr),
            Some(None) => Err(FsError::NotFound(path)),
            None => Ok(FileAttr::from(&self.adb.stat(&path)?)),
        }
    }

    /// Up to `size` bytes of the file at `path`, starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, path: &str, offset: u64, size: usize) -> Result<Vec<u8>, FsError> {
        let path = normalize(path);
        let mut last = self.last_read.lock().unwrap_or_else(PoisonError::into_inner);
        let contents = match last.take() {
            Some((cached, contents)) if cached == path => contents,
            _ => {
                debug!(path, "fetching file contents");
                self.adb.cat(&path)?
            }
        };
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(contents.len());
        let end = start.saturating_add(size).min(contents.len());
        let chunk = contents[start..end].to_vec();
        *last = Some((path, contents));
        Ok(chunk)
    }

    /// Drops every cached directory listing and file.
    pub fn invalidate(&self) {
        self.listings.lock().unwrap_or_else(PoisonError::into_inner).clear();
        *self.last_read.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether `path` is a directory, following a symbolic link one level.
    fn is_directory(&self, path: &str) -> Result<bool, FsError> {
        match self.getattr(path)?.kind {
            FileKind::Directory => Ok(true),
            // A trailing slash makes the device's `ls -d` report the target.
            FileKind::Symlink => match self.adb.stat(&format!("{path}/")) {
                Ok(target) => Ok(target.kind == FileKind::Directory),
                Err(AdbError::NotFound(_) | AdbError::CommandFailed { .. }) => Ok(false),
                Err(err) => Err(err.into()),
            },
            _ => Ok(false),
        }
    }

    fn listing(&self, dir: &str) -> Result<Vec<FileEntry>, FsError> {
        if let Some(entries) =
            self.listings.lock().unwrap_or_else(PoisonError::into_inner).get(dir)
        {
            return Ok(entries.clone());
        }
        debug!(dir, "listing cache miss");
        let entries = self.adb.list_dir(dir)?;
        self.listings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(dir.to_string(), entries.clone());
        Ok(entries)
    }
}

/// Absolute path without duplicate or trailing slashes.
fn normalize(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
    format!("/{}", parts.join("/"))
}

/// Splits a normalized, non-root path into parent directory and final name.
fn split_parent(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some(("", name)) => ("/", name),
        Some((parent, name)) => (parent, name),
        None => ("/", path),
    }
}
