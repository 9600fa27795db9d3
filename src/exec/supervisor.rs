// src/exec/supervisor.rs

//! Owns the single running instance of the program under development.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::project::ProjectLayout;
use crate::reentry::{REENTRY_KEY, REENTRY_VALUE};

/// Starts, tracks and kills the supervised child process.
///
/// At most one child is tracked; [`launch`](Self::launch) replaces whatever
/// handle was held before, so callers terminate first.
#[derive(Debug)]
pub struct ProcessSupervisor {
    root: PathBuf,
    binary: PathBuf,
    args: Vec<String>,
    child: Option<Child>,
}

impl ProcessSupervisor {
    pub fn new(layout: &ProjectLayout, args: Vec<String>) -> Self {
        Self {
            root: layout.root().to_path_buf(),
            binary: layout.binary().to_path_buf(),
            args,
            child: None,
        }
    }

    /// Start the freshly built binary with the reentry marker set.
    ///
    /// Returns as soon as the process has been spawned; its output is shared
    /// with ours.
    pub fn launch(&mut self) -> Result<()> {
        info!(binary = %self.binary.display(), "launching program");

        let child = Command::new(&self.binary)
            .args(&self.args)
            .current_dir(&self.root)
            .env(REENTRY_KEY, REENTRY_VALUE)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("spawning {}", self.binary.display()))?;

        debug!(pid = ?child.id(), "program started");

        if let Some(mut stale) = self.child.replace(child) {
            // Only reachable when a caller skipped terminate(); reap what we can.
            if let Ok(None) = stale.try_wait() {
                warn!(pid = ?stale.id(), "previous program still running while launching a new one");
            }
        }
        Ok(())
    }

    /// Kill the tracked child, if it is still running.
    ///
    /// Failures (including "already exited") are logged and otherwise ignored.
    pub async fn terminate(&mut self) {
        let Some(mut child) = self.child.take() else {
            debug!("no program to terminate");
            return;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(%status, "program had already exited");
                return;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "could not query program status; killing anyway");
            }
        }

        let pid = child.id();
        match child.kill().await {
            Ok(()) => info!(pid = ?pid, "program terminated"),
            Err(err) => warn!(pid = ?pid, error = %err, "process kill error"),
        }
    }

    /// Whether a tracked child exists and has not exited yet.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// OS process id of the tracked child, while it runs.
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }
}
