// src/lib.rs

//! `devloop` watches a project's sources and, whenever one changes, rebuilds
//! the project and replaces the running program with the fresh build.
//!
//! Use it either as the `devloop` binary, or embed it by awaiting
//! [`run_in_place`] at the top of the program's own `main`.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod project;
pub mod reentry;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, load_for_root};
use crate::engine::{Runtime, RuntimeEvent, TriggerReason};
use crate::errors::Result;
use crate::exec::{BuildRunner, ProcessSupervisor, RealRestartBackend};
use crate::fs::{FileSystem, RealFileSystem};
use crate::project::ProjectLayout;
use crate::watch::{ChangeClassifier, spawn_watcher};

/// High-level entry point used by `main.rs`.
///
/// Returns immediately when this process is itself a supervised child.
/// Otherwise this wires together:
/// - project layout and config resolution
/// - the file watcher and change classifier
/// - the restart runtime with the real build/process backend
/// - Ctrl-C handling
///
/// and runs until Ctrl-C.
pub async fn run(args: CliArgs) -> Result<()> {
    if reentry::is_supervised_child() {
        debug!("running as a supervised child; not starting a supervisor");
        return Ok(());
    }

    let (layout, cfg) = resolve(&args)?;

    if args.dry_run {
        print_dry_run(&layout, &cfg);
        return Ok(());
    }

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let classifier = Arc::new(ChangeClassifier::from_config(&cfg.watch, Arc::clone(&fs)));
    let _watcher_handle = spawn_watcher(layout.root(), fs, classifier, rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C; stop devloop by killing it");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let backend = RealRestartBackend::new(
        BuildRunner::new(layout.root(), &cfg.build),
        ProcessSupervisor::new(&layout, cfg.run.args.clone()),
    );

    // Seed the unconditional first build + launch.
    rt_tx
        .send(RuntimeEvent::RestartRequested {
            reason: TriggerReason::Initial,
        })
        .await
        .map_err(anyhow::Error::from)?;

    info!(
        root = %layout.root().display(),
        binary = %layout.binary().display(),
        policy = %cfg.config.restart_policy,
        "devloop supervising"
    );

    let runtime = Runtime::new(backend, cfg.config.restart_policy, rt_rx);
    runtime.run().await
}

/// Embedded entry point: await this first thing in a program's `main`.
///
/// In a supervised child this is a no-op returning `Ok(())`, so the program
/// simply carries on. In the supervising process it watches the current
/// directory and never returns normally: once Ctrl-C has shut the supervisor
/// down, the process exits.
pub async fn run_in_place() -> Result<()> {
    if reentry::is_supervised_child() {
        return Ok(());
    }

    run(CliArgs::default()).await?;
    std::process::exit(0);
}

fn resolve(args: &CliArgs) -> Result<(ProjectLayout, ConfigFile)> {
    let root = match args.root {
        Some(ref root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let mut cfg = load_for_root(&root, args.config.as_deref())?;
    cfg.run.args.extend(args.child_args.iter().cloned());

    let layout = ProjectLayout::resolve(Some(&root), &cfg)?;
    Ok((layout, cfg))
}

/// Simple dry-run output: print what would be watched, built and run.
fn print_dry_run(layout: &ProjectLayout, cfg: &ConfigFile) {
    println!("devloop dry-run");
    println!("  root = {}", layout.root().display());
    println!("  binary = {}", layout.binary().display());
    if !cfg.run.args.is_empty() {
        println!("  args = {:?}", cfg.run.args);
    }
    println!("  restart_policy = {}", cfg.config.restart_policy);
    println!();

    println!("watch:");
    println!("  source_suffix = {:?}", cfg.watch.source_suffix);
    println!("  transient_marker = {:?}", cfg.watch.transient_marker);
    println!();

    println!("build steps ({}):", cfg.build.steps.len());
    for step in &cfg.build.steps {
        println!("  - {}", step.join(" "));
    }
    for (key, value) in &cfg.build.env {
        println!("  env {key}={value}");
    }

    debug!("dry-run complete (no execution)");
}
