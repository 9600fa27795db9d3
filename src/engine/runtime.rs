// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::RestartBackend;
use crate::types::RestartPolicy;

use super::RuntimeEvent;
use super::coordinator::RestartCoordinator;
use super::dispatch::RestartDispatcher;

/// Supervisor context for one `run` invocation.
///
/// Owns the restart coordinator and dispatcher and reacts to
/// `RuntimeEvent`s until shutdown. The watcher side holds its own
/// classifier and only talks to this loop through the event channel.
pub struct Runtime<B: RestartBackend + 'static> {
    coordinator: Arc<RestartCoordinator<B>>,
    dispatcher: RestartDispatcher<B>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl<B: RestartBackend + 'static> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl<B: RestartBackend + 'static> Runtime<B> {
    /// Must be called from within a Tokio runtime.
    pub fn new(backend: B, policy: RestartPolicy, event_rx: mpsc::Receiver<RuntimeEvent>) -> Self {
        let coordinator = Arc::new(RestartCoordinator::new(backend));
        let dispatcher = RestartDispatcher::new(Arc::clone(&coordinator), policy);
        Self {
            coordinator,
            dispatcher,
            event_rx,
        }
    }

    pub fn coordinator(&self) -> Arc<RestartCoordinator<B>> {
        Arc::clone(&self.coordinator)
    }

    /// Main event loop.
    ///
    /// Runs until `ShutdownRequested` arrives or every sender is dropped,
    /// then cancels outstanding cycles and kills the running program.
    pub async fn run(mut self) -> Result<()> {
        info!("devloop runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::RestartRequested { reason } => self.dispatcher.request(reason),
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested");
                    break;
                }
            }
        }

        self.dispatcher.close().await;
        self.coordinator.shutdown().await;

        info!(
            cycles = self.coordinator.completed_cycles(),
            "runtime exiting"
        );
        Ok(())
    }
}
