// src/engine/coordinator.rs

//! The restart cycle and the lock that serialises it.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::exec::{BuildOutcome, RestartBackend};

use super::TriggerReason;

/// Whether a cycle currently holds the restart lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Restarting,
}

/// Summary of one finished cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// 1-based sequence number of the cycle.
    pub cycle: u64,
    pub build: BuildOutcome,
    /// Whether the new program was spawned.
    pub launched: bool,
}

/// Runs build → terminate → launch cycles, one at a time.
///
/// The backend lives inside the restart lock: holding the lock is the
/// `Restarting` state, and callers that arrive meanwhile wait on it rather
/// than being turned away.
#[derive(Debug)]
pub struct RestartCoordinator<B: RestartBackend> {
    backend: Mutex<B>,
    completed: AtomicU64,
}

impl<B: RestartBackend> RestartCoordinator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
            completed: AtomicU64::new(0),
        }
    }

    /// Run one full cycle, waiting for any cycle already in progress.
    ///
    /// A failed build does not abort the cycle: the previous binary, if any,
    /// is relaunched. Launch failures are logged. The cycle ends once the new
    /// program has been spawned, not when it exits.
    pub async fn run_cycle(&self, reason: &TriggerReason) -> CycleReport {
        let mut backend = self.backend.lock().await;
        info!(%reason, "restarting");

        let build = backend.build().await;
        if !build.is_success() {
            warn!(?build, "build failed; relaunching the last binary on disk");
        }

        backend.terminate().await;

        let launched = match backend.launch().await {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "failed to launch program");
                false
            }
        };

        let cycle = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        info!(cycle, launched, "restart cycle finished");

        CycleReport {
            cycle,
            build,
            launched,
        }
    }

    /// Stop the running program for good. Waits for an in-flight cycle.
    pub async fn shutdown(&self) {
        let mut backend = self.backend.lock().await;
        backend.terminate().await;
    }

    pub fn state(&self) -> CoordinatorState {
        match self.backend.try_lock() {
            Ok(_) => CoordinatorState::Idle,
            Err(_) => CoordinatorState::Restarting,
        }
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }
}
