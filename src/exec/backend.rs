// src/exec/backend.rs

//! Pluggable restart backend abstraction.
//!
//! The restart coordinator talks to a `RestartBackend` instead of directly to
//! the build runner and process supervisor. This makes it easy to swap in a
//! fake backend in tests while keeping the production implementation here.
//!
//! - `RealRestartBackend` runs the configured toolchain and owns the real
//!   child process.
//! - Tests can provide their own `RestartBackend` that, for example, records
//!   call order or checks that cycles never overlap.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::build::{BuildOutcome, BuildRunner};
use super::supervisor::ProcessSupervisor;

/// The three steps of a restart cycle.
pub trait RestartBackend: Send {
    /// Rebuild the project. Failures are reported, not raised.
    fn build(&mut self) -> Pin<Box<dyn Future<Output = BuildOutcome> + Send + '_>>;

    /// Stop the currently running program, if any. Never fails.
    fn terminate(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;

    /// Start the program from whatever binary is on disk, without waiting
    /// for it to exit.
    fn launch(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real backend used in production.
#[derive(Debug)]
pub struct RealRestartBackend {
    builder: BuildRunner,
    supervisor: ProcessSupervisor,
}

impl RealRestartBackend {
    pub fn new(builder: BuildRunner, supervisor: ProcessSupervisor) -> Self {
        Self {
            builder,
            supervisor,
        }
    }
}

impl RestartBackend for RealRestartBackend {
    fn build(&mut self) -> Pin<Box<dyn Future<Output = BuildOutcome> + Send + '_>> {
        Box::pin(self.builder.run())
    }

    fn terminate(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(self.supervisor.terminate())
    }

    fn launch(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move { self.supervisor.launch() })
    }
}
