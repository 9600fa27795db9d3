use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use devloop::errors::Result;
use devloop::exec::{BuildOutcome, RestartBackend};

/// One call the coordinator made on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Build,
    Terminate,
    Launch,
}

#[derive(Debug, Default)]
struct Shared {
    calls: Vec<BackendCall>,
    /// Children "running" right now (launched and not yet terminated).
    live: usize,
    max_live: usize,
    /// Set between build start and launch end.
    in_cycle: bool,
    overlaps: usize,
    build_fails: bool,
    launch_fails: bool,
}

/// A fake backend that:
/// - records every call in order
/// - models the child slot to count live handles
/// - flags cycles that overlap each other
/// - optionally sleeps during `build` to widen race windows.
///
/// Cloning shares the recorded state, so tests keep a clone for inspection
/// after handing one to the coordinator.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    shared: Arc<Mutex<Shared>>,
    build_delay: Duration,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build_delay(mut self, delay: Duration) -> Self {
        self.build_delay = delay;
        self
    }

    pub fn set_build_fails(&self, fails: bool) {
        self.shared.lock().unwrap().build_fails = fails;
    }

    pub fn set_launch_fails(&self, fails: bool) {
        self.shared.lock().unwrap().launch_fails = fails;
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.shared.lock().unwrap().calls.clone()
    }

    pub fn launches(&self) -> usize {
        self.count(BackendCall::Launch)
    }

    pub fn builds(&self) -> usize {
        self.count(BackendCall::Build)
    }

    pub fn live(&self) -> usize {
        self.shared.lock().unwrap().live
    }

    pub fn max_live(&self) -> usize {
        self.shared.lock().unwrap().max_live
    }

    pub fn overlaps(&self) -> usize {
        self.shared.lock().unwrap().overlaps
    }

    fn count(&self, call: BackendCall) -> usize {
        self.shared
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == call)
            .count()
    }
}

impl RestartBackend for FakeBackend {
    fn build(&mut self) -> Pin<Box<dyn Future<Output = BuildOutcome> + Send + '_>> {
        let shared = Arc::clone(&self.shared);
        let delay = self.build_delay;

        Box::pin(async move {
            let fails = {
                let mut guard = shared.lock().unwrap();
                if guard.in_cycle {
                    guard.overlaps += 1;
                }
                guard.in_cycle = true;
                guard.calls.push(BackendCall::Build);
                guard.build_fails
            };

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            if fails {
                BuildOutcome::Failed {
                    step: 1,
                    code: Some(2),
                }
            } else {
                BuildOutcome::Success
            }
        })
    }

    fn terminate(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let shared = Arc::clone(&self.shared);
        Box::pin(async move {
            let mut guard = shared.lock().unwrap();
            guard.calls.push(BackendCall::Terminate);
            guard.live = 0;
        })
    }

    fn launch(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let shared = Arc::clone(&self.shared);
        Box::pin(async move {
            let mut guard = shared.lock().unwrap();
            guard.calls.push(BackendCall::Launch);
            guard.in_cycle = false;
            if guard.launch_fails {
                return Err(anyhow::anyhow!("binary missing").into());
            }
            guard.live += 1;
            guard.max_live = guard.max_live.max(guard.live);
            Ok(())
        })
    }
}
