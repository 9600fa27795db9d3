// src/watch/event_handler.rs

//! Event processing logic for file system changes.

use notify::Event;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{RuntimeEvent, TriggerReason};
use crate::fs::FileSystem;
use crate::types::ChangeKind;
use crate::watch::classifier::{ChangeClassifier, WatchEvent};

/// Handle one item from the notify stream.
///
/// Stream errors are logged and skipped. Every path of a successful event is
/// passed to [`process_watch_event`]. Returns `false` once the runtime
/// channel is closed.
pub async fn process_notify_result(
    res: notify::Result<Event>,
    classifier: &ChangeClassifier,
    fs: &dyn FileSystem,
    runtime_tx: &mpsc::Sender<RuntimeEvent>,
) -> bool {
    let event = match res {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "file watch error");
            return true;
        }
    };
    debug!(?event, "received notify event");

    let kind = ChangeKind::from(&event.kind);
    for path in event.paths {
        if !process_watch_event(classifier, fs, WatchEvent::new(path, kind), runtime_tx).await {
            return false;
        }
    }
    true
}

/// Classify a single watch event and, if it qualifies, ask the runtime for a
/// restart.
///
/// Returns `false` once the runtime channel is closed, telling the caller to
/// stop consuming events.
pub async fn process_watch_event(
    classifier: &ChangeClassifier,
    fs: &dyn FileSystem,
    event: WatchEvent,
    runtime_tx: &mpsc::Sender<RuntimeEvent>,
) -> bool {
    if event.kind == ChangeKind::Create && fs.is_dir(&event.path) {
        debug!(
            dir = %event.path.display(),
            "new directory appeared; it is not watched until devloop restarts"
        );
        return true;
    }

    if !classifier.classify(&event).is_trigger() {
        return true;
    }

    info!(path = %event.path.display(), "fired by change");

    if let Err(err) = runtime_tx
        .send(RuntimeEvent::RestartRequested {
            reason: TriggerReason::FileChange(event.path),
        })
        .await
    {
        warn!("failed to send RuntimeEvent::RestartRequested: {err}");
        return false;
    }

    true
}
