// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
///
/// Change classification and event handling only ever go through this
/// trait, so both can be exercised against [`mock::MockFileSystem`].
pub trait FileSystem: Send + Sync + Debug {
    fn is_dir(&self, path: &Path) -> bool;

    /// Last modification time in whole seconds since the Unix epoch
    /// (negative for timestamps before it).
    fn modified_secs(&self, path: &Path) -> Result<i64>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn modified_secs(&self, path: &Path) -> Result<i64> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("reading mtime of {:?}", path))?;

        let secs = match modified.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_secs() as i64,
            Err(before) => -(before.duration().as_secs() as i64),
        };
        Ok(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_fs_reports_mtime_and_kind() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.go");
        fs::write(&file, "package main").unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();

        let real = RealFileSystem;
        assert!(real.modified_secs(&file).unwrap() > 0);
        assert!(real.modified_secs(&dir.path().join("missing.go")).is_err());

        assert!(real.is_dir(&dir.path().join("pkg")));
        assert!(!real.is_dir(&file));
    }
}
