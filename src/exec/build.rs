// src/exec/build.rs

//! Build runner: invokes the project's toolchain steps in order.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

use crate::config::BuildSection;

/// Result of running all build steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    /// Step `step` (0-based) was the first to fail. `code` is `None` when the
    /// step could not be spawned or was killed by a signal.
    Failed { step: usize, code: Option<i32> },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

/// Runs `[build].steps` from the project root.
///
/// Step output goes straight to our own stdout/stderr. Every step runs even
/// after an earlier one failed; the first failure is reported, never raised.
#[derive(Debug, Clone)]
pub struct BuildRunner {
    root: PathBuf,
    steps: Vec<Vec<String>>,
    env: BTreeMap<String, String>,
}

impl BuildRunner {
    pub fn new(root: impl Into<PathBuf>, build: &BuildSection) -> Self {
        Self {
            root: root.into(),
            steps: build.steps.clone(),
            env: build.env.clone(),
        }
    }

    pub async fn run(&self) -> BuildOutcome {
        let mut outcome = BuildOutcome::Success;

        for (idx, step) in self.steps.iter().enumerate() {
            let Some((program, args)) = step.split_first() else {
                continue;
            };

            info!(step = idx, cmd = %step.join(" "), "running build step");

            let mut cmd = Command::new(program);
            cmd.args(args)
                .current_dir(&self.root)
                .envs(&self.env)
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .kill_on_drop(true);

            let failed_code = match cmd.status().await {
                Ok(status) if status.success() => continue,
                Ok(status) => {
                    warn!(step = idx, cmd = %step.join(" "), exit_code = ?status.code(), "build step failed");
                    status.code()
                }
                Err(err) => {
                    warn!(step = idx, cmd = %step.join(" "), error = %err, "could not start build step");
                    None
                }
            };

            if outcome.is_success() {
                outcome = BuildOutcome::Failed {
                    step: idx,
                    code: failed_code,
                };
            }
        }

        outcome
    }
}
