// src/engine/dispatch.rs

//! Turning restart requests into cycles according to the restart policy.
//!
//! - `Coalesce`: a single worker drains a one-slot channel. While a cycle
//!   runs, the first new trigger takes the slot and later ones are dropped,
//!   so any burst costs at most one extra cycle.
//! - `Serial`: every trigger gets its own task that waits on the restart
//!   lock, so N triggers run N cycles back to back.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::{JoinHandle, JoinSet};
use tracing::debug;

use crate::exec::RestartBackend;
use crate::types::RestartPolicy;

use super::TriggerReason;
use super::coordinator::RestartCoordinator;

enum Mode {
    Coalesce {
        slot: mpsc::Sender<TriggerReason>,
        worker: JoinHandle<()>,
    },
    Serial(JoinSet<()>),
}

pub struct RestartDispatcher<B: RestartBackend + 'static> {
    coordinator: Arc<RestartCoordinator<B>>,
    mode: Mode,
}

impl<B: RestartBackend + 'static> std::fmt::Debug for RestartDispatcher<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match self.mode {
            Mode::Coalesce { .. } => RestartPolicy::Coalesce,
            Mode::Serial(_) => RestartPolicy::Serial,
        };
        f.debug_struct("RestartDispatcher")
            .field("policy", &policy)
            .finish_non_exhaustive()
    }
}

impl<B: RestartBackend + 'static> RestartDispatcher<B> {
    /// Must be called from within a Tokio runtime.
    pub fn new(coordinator: Arc<RestartCoordinator<B>>, policy: RestartPolicy) -> Self {
        let mode = match policy {
            RestartPolicy::Coalesce => {
                let (slot, mut pending) = mpsc::channel::<TriggerReason>(1);
                let coord = Arc::clone(&coordinator);
                let worker = tokio::spawn(async move {
                    while let Some(reason) = pending.recv().await {
                        coord.run_cycle(&reason).await;
                    }
                });
                Mode::Coalesce { slot, worker }
            }
            RestartPolicy::Serial => Mode::Serial(JoinSet::new()),
        };

        Self { coordinator, mode }
    }

    /// Request a cycle. Never blocks.
    pub fn request(&mut self, reason: TriggerReason) {
        match &mut self.mode {
            Mode::Coalesce { slot, .. } => match slot.try_send(reason) {
                Ok(()) => {}
                Err(TrySendError::Full(reason)) => {
                    debug!(%reason, "restart already pending; trigger coalesced");
                }
                Err(TrySendError::Closed(reason)) => {
                    debug!(%reason, "dispatcher closed; trigger dropped");
                }
            },
            Mode::Serial(tasks) => {
                // Reap finished cycles so the set doesn't grow without bound.
                while tasks.try_join_next().is_some() {}

                let coord = Arc::clone(&self.coordinator);
                tasks.spawn(async move {
                    coord.run_cycle(&reason).await;
                });
            }
        }
    }

    /// Abort pending and in-flight cycles.
    pub async fn close(self) {
        match self.mode {
            Mode::Coalesce { slot, worker } => {
                drop(slot);
                worker.abort();
                let _ = worker.await;
            }
            Mode::Serial(mut tasks) => {
                tasks.shutdown().await;
            }
        }
    }

    /// Wait until every accepted request has been served, then stop.
    pub async fn drain(self) {
        match self.mode {
            Mode::Coalesce { slot, worker } => {
                drop(slot);
                let _ = worker.await;
            }
            Mode::Serial(mut tasks) => while tasks.join_next().await.is_some() {},
        }
    }
}
