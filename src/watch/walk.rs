// src/watch/walk.rs

//! Enumerate the directories to register with the watcher.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::errors::{DevloopError, Result};

/// Collect `root` and every directory below it, parents before children and
/// siblings in name order.
///
/// Symlinks are never followed, so a link pointing back up the tree cannot
/// make the walk revisit it. The root itself must be readable. Subdirectories
/// that cannot be listed are still returned (so they get watched) but not
/// descended into.
pub fn watched_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(DevloopError::ConfigError(format!(
            "project root {} is not a directory",
            root.display()
        )));
    }

    let mut dirs = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => dirs.push(entry.into_path()),
            Ok(_) => {}
            Err(err) if err.path() == Some(root) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("listing project root {}", root.display()))
                    .into());
            }
            Err(err) => {
                warn!(path = ?err.path(), error = %err, "cannot list directory; not descending");
            }
        }
    }

    Ok(dirs)
}
