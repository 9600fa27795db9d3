// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Registering every project directory with a cross-platform filesystem
//!   watcher (`notify`).
//! - Classifying raw change events into rebuild triggers, with per-path
//!   modification-time deduplication.
//!
//! It knows nothing about builds or processes; it only turns filesystem
//! changes into `RuntimeEvent::RestartRequested`.

pub mod classifier;
pub mod event_handler;
pub mod walk;
pub mod watcher;

pub use classifier::{ChangeClassifier, Classification, ModTimeTable, WatchEvent};
pub use event_handler::{process_notify_result, process_watch_event};
pub use walk::watched_dirs;
pub use watcher::{WatcherHandle, spawn_watcher};
