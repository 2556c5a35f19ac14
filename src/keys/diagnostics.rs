//! Startup inspection of key locations.
//!
//! When a volume mount is missing the resolver only reports "not found";
//! these reports show what actually exists around each candidate.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What was found at an inspected path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathReport {
    Missing { reason: String },
    Directory { entries: Vec<String> },
    File { size: u64 },
}

/// Inspect a single path without following into subdirectories.
#[must_use]
pub fn inspect_path(path: &Path) -> PathReport {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            return PathReport::Missing {
                reason: e.to_string(),
            }
        }
    };

    if metadata.is_dir() {
        let mut entries: Vec<String> = fs::read_dir(path)
            .map(|rd| {
                rd.filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        entries.sort();
        PathReport::Directory { entries }
    } else {
        PathReport::File {
            size: metadata.len(),
        }
    }
}

/// Log the working directory and the parent directory of every candidate.
pub fn log_candidate_locations(candidates: &[PathBuf]) {
    if let Ok(cwd) = std::env::current_dir() {
        debug!(cwd = %cwd.display(), "Working directory");
    }

    let mut seen: Vec<&Path> = Vec::new();
    for candidate in candidates {
        let Some(parent) = candidate.parent().filter(|p| !p.as_os_str().is_empty()) else {
            continue;
        };
        if seen.contains(&parent) {
            continue;
        }
        seen.push(parent);

        match inspect_path(parent) {
            PathReport::Missing { reason } => {
                debug!(path = %parent.display(), %reason, "Key directory not accessible");
            }
            PathReport::Directory { entries } => {
                debug!(path = %parent.display(), ?entries, "Key directory contents");
            }
            PathReport::File { size } => {
                debug!(path = %parent.display(), size, "Key directory is a file");
            }
        }
    }
}
