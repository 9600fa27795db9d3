// src/engine/mod.rs

//! Orchestration engine for devloop.
//!
//! This module ties together:
//! - the restart coordinator (the lock-guarded build → terminate → launch
//!   cycle)
//! - the dispatcher (what happens to triggers that arrive mid-cycle)
//! - the main runtime event loop that reacts to file-change triggers and
//!   shutdown requests

use std::fmt;
use std::path::PathBuf;

pub mod coordinator;
pub mod dispatch;
pub mod runtime;

pub use coordinator::{CoordinatorState, CycleReport, RestartCoordinator};
pub use dispatch::RestartDispatcher;
pub use runtime::Runtime;

/// Why a restart cycle was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerReason {
    /// The unconditional cycle at startup.
    Initial,
    /// A watched source file changed.
    FileChange(PathBuf),
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerReason::Initial => f.write_str("initial build"),
            TriggerReason::FileChange(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Events flowing into the runtime from the watcher and signal handlers.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Run a rebuild + relaunch cycle.
    RestartRequested { reason: TriggerReason },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}
