// tests/real_restart_cycle.rs
//
// End-to-end restart cycles against real processes, using `sh` as the
// "toolchain" and a shell script as the built program.
#![cfg(unix)]

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::{init_tracing, wait_until};

use std::fs;
use std::path::{Path, PathBuf};

use devloop::engine::{RestartCoordinator, TriggerReason};
use devloop::exec::{BuildRunner, ProcessSupervisor, RealRestartBackend};
use devloop::project::ProjectLayout;

/// The "build" writes an executable `app` script that appends its PID to
/// `pids.txt` and then idles. It fails whenever a `broken` file exists.
const BUILD_SCRIPT: &str = r#"if [ -e broken ]; then echo "syntax error" >&2; exit 1; fi
printf '#!/bin/sh\necho $$ >> pids.txt\nexec sleep 30\n' > app
chmod +x app"#;

fn pids(root: &Path) -> Vec<u32> {
    fs::read_to_string(root.join("pids.txt"))
        .unwrap_or_default()
        .lines()
        .filter_map(|l| l.trim().parse().ok())
        .collect()
}

fn is_alive(pid: u32) -> bool {
    // Zombies still answer `kill -0`; read the state from /proc where we can.
    let status = PathBuf::from(format!("/proc/{pid}/status"));
    if status.parent().is_some_and(Path::exists) {
        return fs::read_to_string(status)
            .map(|s| !s.lines().any(|l| l.starts_with("State:") && l.contains('Z')))
            .unwrap_or(false);
    }
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn coordinator(root: &Path) -> RestartCoordinator<RealRestartBackend> {
    let mut cfg = ConfigFileBuilder::new().binary("app").build();
    cfg.build.steps = vec![vec![
        "sh".to_string(),
        "-c".to_string(),
        BUILD_SCRIPT.to_string(),
    ]];

    let layout = ProjectLayout::resolve(Some(root), &cfg).unwrap();
    RestartCoordinator::new(RealRestartBackend::new(
        BuildRunner::new(layout.root(), &cfg.build),
        ProcessSupervisor::new(&layout, cfg.run.args.clone()),
    ))
}

#[tokio::test]
async fn rebuild_replaces_the_running_program() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let coord = coordinator(&root);

    let first = coord.run_cycle(&TriggerReason::Initial).await;
    assert!(first.build.is_success());
    assert!(first.launched);
    wait_until(|| pids(&root).len() == 1).await;
    let old = pids(&root)[0];
    assert!(is_alive(old));

    let second = coord
        .run_cycle(&TriggerReason::FileChange(root.join("main.go")))
        .await;
    assert!(second.launched);
    wait_until(|| pids(&root).len() == 2).await;

    assert!(!is_alive(old), "old program survived the restart");
    assert!(is_alive(pids(&root)[1]));

    coord.shutdown().await;
    wait_until(|| !is_alive(pids(&root)[1])).await;
}

#[tokio::test]
async fn broken_build_relaunches_previous_binary() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let coord = coordinator(&root);

    coord.run_cycle(&TriggerReason::Initial).await;
    wait_until(|| pids(&root).len() == 1).await;

    fs::write(root.join("broken"), "").unwrap();
    let report = coord
        .run_cycle(&TriggerReason::FileChange(root.join("main.go")))
        .await;

    assert!(!report.build.is_success());
    assert!(report.launched, "previous binary should have been relaunched");
    wait_until(|| pids(&root).len() == 2).await;
    assert!(!is_alive(pids(&root)[0]));

    coord.shutdown().await;
}

#[tokio::test]
async fn first_build_failure_leaves_nothing_to_launch() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::write(root.join("broken"), "").unwrap();
    let coord = coordinator(&root);

    let report = coord.run_cycle(&TriggerReason::Initial).await;
    assert!(!report.build.is_success());
    assert!(!report.launched);
    assert_eq!(coord.completed_cycles(), 1);
}
