// src/fs/mock.rs

use super::FileSystem;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntry {
    File { modified: i64 },
    Dir,
}

/// In-memory filesystem for tests.
///
/// Files carry an explicit modification time so tests can simulate saves,
/// no-op touches and clock-resolution collisions. Adding a file or directory
/// creates its missing ancestors.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, modified: i64) {
        let path = path.as_ref();
        let mut entries = self.entries.lock().unwrap();
        add_ancestors(&mut entries, path);
        entries.insert(path.to_path_buf(), MockEntry::File { modified });
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut entries = self.entries.lock().unwrap();
        add_ancestors(&mut entries, path);
        entries.insert(path.to_path_buf(), MockEntry::Dir);
    }

    /// Update the modification time of an existing file, as a save would.
    pub fn set_modified(&self, path: impl AsRef<Path>, modified: i64) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(MockEntry::File { modified: m }) = entries.get_mut(path.as_ref()) {
            *m = modified;
        }
    }

    /// Remove an entry, as if it vanished between an event and the stat that
    /// follows it.
    pub fn remove(&self, path: impl AsRef<Path>) {
        self.entries.lock().unwrap().remove(path.as_ref());
    }
}

fn add_ancestors(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        entries
            .entry(ancestor.to_path_buf())
            .or_insert(MockEntry::Dir);
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(path), Some(MockEntry::Dir))
    }

    fn modified_secs(&self, path: &Path) -> Result<i64> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::File { modified }) => Ok(*modified),
            Some(MockEntry::Dir) => Ok(0),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }
}
