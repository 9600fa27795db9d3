// src/watch/classifier.rs

//! Decides which filesystem events are worth a rebuild.
//!
//! A change qualifies when the path carries the project's source suffix, is
//! not an editor swap/lock file, and its modification time (in whole seconds)
//! differs from the last one recorded for that path. The timestamp check
//! swallows the duplicate notifications most platforms emit for a single save
//! and ignores touches that leave `mtime` alone.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::config::WatchSection;
use crate::fs::FileSystem;
use crate::types::ChangeKind;

/// A single change reported by the watch source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl WatchEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Outcome of classifying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The change should start a restart cycle.
    Trigger,
    /// Path doesn't end in the source suffix.
    NotSource,
    /// Path contains the transient-file marker.
    Transient,
    /// The file could not be stat'ed (e.g. removed before we looked).
    Unreadable,
    /// Modification time matches what we saw last time.
    Unchanged,
}

impl Classification {
    pub fn is_trigger(self) -> bool {
        matches!(self, Classification::Trigger)
    }
}

/// Last-seen modification time per path.
///
/// Entries are only ever inserted or overwritten, never removed.
#[derive(Debug, Default)]
pub struct ModTimeTable {
    entries: HashMap<PathBuf, i64>,
}

impl ModTimeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `mtime` for `path` and return the previously recorded value.
    pub fn record(&mut self, path: &Path, mtime: i64) -> Option<i64> {
        self.entries.insert(path.to_path_buf(), mtime)
    }

    pub fn get(&self, path: &Path) -> Option<i64> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Filters raw watch events down to rebuild triggers.
///
/// Shared between event-handling tasks; the table sits behind a mutex.
#[derive(Debug)]
pub struct ChangeClassifier {
    source_suffix: String,
    transient_marker: String,
    fs: Arc<dyn FileSystem>,
    mod_times: Mutex<ModTimeTable>,
}

impl ChangeClassifier {
    pub fn new(
        source_suffix: impl Into<String>,
        transient_marker: impl Into<String>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            source_suffix: source_suffix.into(),
            transient_marker: transient_marker.into(),
            fs,
            mod_times: Mutex::new(ModTimeTable::new()),
        }
    }

    pub fn from_config(watch: &WatchSection, fs: Arc<dyn FileSystem>) -> Self {
        Self::new(
            watch.source_suffix.clone(),
            watch.transient_marker.clone(),
            fs,
        )
    }

    /// Classify one event, updating the modification-time table for source
    /// files that could be stat'ed.
    pub fn classify(&self, event: &WatchEvent) -> Classification {
        let path = &event.path;
        let path_str = path.to_string_lossy();

        if !path_str.ends_with(self.source_suffix.as_str()) {
            trace!(path = %path_str, "not a source file");
            return Classification::NotSource;
        }
        if path_str.contains(self.transient_marker.as_str()) {
            trace!(path = %path_str, "transient editor file");
            return Classification::Transient;
        }

        let mtime = match self.fs.modified_secs(path) {
            Ok(mtime) => mtime,
            Err(err) => {
                debug!(path = %path_str, kind = ?event.kind, error = %err, "stat failed; treating as unchanged");
                return Classification::Unreadable;
            }
        };

        let previous = {
            // A poisoned table is still a valid table: every write is a
            // single insert.
            let mut table = self
                .mod_times
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            table.record(path, mtime)
        };

        if previous == Some(mtime) {
            trace!(path = %path_str, mtime, "modification time unchanged");
            Classification::Unchanged
        } else {
            debug!(path = %path_str, kind = ?event.kind, ?previous, mtime, "source change detected");
            Classification::Trigger
        }
    }

    /// Last modification time recorded for `path`, if any.
    pub fn recorded_mtime(&self, path: &Path) -> Option<i64> {
        self.mod_times
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
    }

    /// Number of paths the classifier has seen so far.
    pub fn tracked_paths(&self) -> usize {
        self.mod_times
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn classifier(fs: &MockFileSystem) -> ChangeClassifier {
        ChangeClassifier::new(".go", ".#", Arc::new(fs.clone()))
    }

    fn modify(path: &str) -> WatchEvent {
        WatchEvent::new(path, ChangeKind::Modify)
    }

    #[test]
    fn first_sighting_triggers_even_at_time_zero() {
        let fs = MockFileSystem::new();
        fs.add_file("main.go", 0);
        let c = classifier(&fs);

        assert_eq!(c.classify(&modify("main.go")), Classification::Trigger);
        assert_eq!(c.recorded_mtime(Path::new("main.go")), Some(0));
    }

    #[test]
    fn same_mtime_twice_triggers_once() {
        let fs = MockFileSystem::new();
        fs.add_file("main.go", 100);
        let c = classifier(&fs);

        assert!(c.classify(&modify("main.go")).is_trigger());
        assert_eq!(c.classify(&modify("main.go")), Classification::Unchanged);

        fs.set_modified("main.go", 101);
        assert!(c.classify(&modify("main.go")).is_trigger());
    }

    #[test]
    fn older_mtime_still_counts_as_change() {
        // e.g. a `git checkout` restoring an older file.
        let fs = MockFileSystem::new();
        fs.add_file("main.go", 200);
        let c = classifier(&fs);

        assert!(c.classify(&modify("main.go")).is_trigger());
        fs.set_modified("main.go", 150);
        assert!(c.classify(&modify("main.go")).is_trigger());
        assert_eq!(c.recorded_mtime(Path::new("main.go")), Some(150));
    }

    #[test]
    fn wrong_suffix_and_swap_files_are_ignored_without_stat() {
        let fs = MockFileSystem::new();
        fs.add_file("README.md", 1);
        fs.add_file(".#main.go", 1);
        let c = classifier(&fs);

        assert_eq!(c.classify(&modify("README.md")), Classification::NotSource);
        assert_eq!(c.classify(&modify(".#main.go")), Classification::Transient);
        assert_eq!(c.tracked_paths(), 0);
    }

    #[test]
    fn vanished_file_is_unchanged_and_not_recorded() {
        let fs = MockFileSystem::new();
        let c = classifier(&fs);

        let removed = WatchEvent::new("gone.go", ChangeKind::Remove);
        assert_eq!(c.classify(&removed), Classification::Unreadable);
        assert_eq!(c.recorded_mtime(Path::new("gone.go")), None);
    }

    #[test]
    fn paths_are_tracked_independently() {
        let fs = MockFileSystem::new();
        fs.add_file("main.go", 10);
        fs.add_file("util.go", 10);
        let c = classifier(&fs);

        assert!(c.classify(&modify("main.go")).is_trigger());
        assert!(c.classify(&modify("util.go")).is_trigger());
        assert_eq!(c.tracked_paths(), 2);
    }
}
