//! Ordered-fallback resolution of the PEM signing key.
//!
//! The caller supplies candidate locations in priority order; the first one
//! that yields bytes wins. Reading goes through [`KeySource`] so resolution
//! can be exercised without touching the filesystem.

use crate::error::StsError;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of raw key bytes addressed by path.
pub trait KeySource: Send + Sync {
    /// Read the full contents at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads keys from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsKeySource;

impl KeySource for FsKeySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory key source, keyed by exact path.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryKeySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), bytes.into());
        self
    }
}

impl KeySource for MemoryKeySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such key file"))
    }
}

/// Raw key bytes together with the candidate that produced them.
#[derive(Clone)]
pub struct LoadedKey {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for LoadedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedKey")
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Try each candidate in order and return the first readable one.
///
/// # Errors
///
/// Returns [`StsError::KeyNotFound`] when no candidate can be read.
pub fn resolve<S, P>(candidates: &[P], source: &S) -> Result<LoadedKey, StsError>
where
    S: KeySource + ?Sized,
    P: AsRef<Path>,
{
    for candidate in candidates {
        let path = candidate.as_ref();
        debug!(path = %path.display(), "Trying signing key candidate");

        match source.read(path) {
            Ok(bytes) => {
                debug!(path = %path.display(), "Signing key candidate readable");
                return Ok(LoadedKey {
                    path: path.to_path_buf(),
                    bytes,
                });
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Signing key candidate unreadable");
            }
        }
    }

    Err(StsError::KeyNotFound {
        candidates: candidates.iter().map(|p| p.as_ref().to_path_buf()).collect(),
    })
}
