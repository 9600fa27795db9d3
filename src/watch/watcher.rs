// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::RuntimeEvent;
use crate::errors::{DevloopError, Result};
use crate::fs::FileSystem;
use crate::watch::classifier::ChangeClassifier;
use crate::watch::event_handler::process_notify_result;
use crate::watch::walk::watched_dirs;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    watched: Vec<PathBuf>,
}

impl WatcherHandle {
    /// Directories registered at startup.
    pub fn watched_dirs(&self) -> &[PathBuf] {
        &self.watched
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("watched", &self.watched.len())
            .finish()
    }
}

/// Start watching `root` and every directory below it, feeding qualifying
/// changes to the runtime as `RuntimeEvent::RestartRequested`.
///
/// Each directory present now is registered individually (non-recursive), so
/// directories created later are not picked up.
///
/// Any failure to create the watcher or to register a directory is returned
/// as [`DevloopError::WatchSetup`]; errors reported later by the watcher are
/// only logged.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    fs: Arc<dyn FileSystem>,
    classifier: Arc<ChangeClassifier>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if event_tx.send(res).is_err() {
                // Receiver gone means the runtime is shutting down.
                debug!("dropping notify event after watcher loop exit");
            }
        },
        Config::default(),
    )
    .map_err(|source| DevloopError::WatchSetup {
        path: root.clone(),
        source,
    })?;

    let dirs = watched_dirs(&root)?;
    for dir in &dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| DevloopError::WatchSetup {
                path: dir.clone(),
                source,
            })?;
    }

    info!(root = %root.display(), dirs = dirs.len(), "file watcher started");

    tokio::spawn(async move {
        while let Some(res) = event_rx.recv().await {
            if !process_notify_result(res, &classifier, fs.as_ref(), &runtime_tx).await {
                debug!("runtime channel closed; stopping watcher loop");
                return;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        watched: dirs,
    })
}
