// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `devloop`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "devloop",
    version,
    about = "Rebuild and relaunch a program whenever its sources change.",
    long_about = None
)]
pub struct CliArgs {
    /// Project root to watch and build.
    ///
    /// Default: the current working directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Devloop.toml` in the project root. A missing default file is
    /// fine; a missing explicit file is an error.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DEVLOOP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the configuration, but don't build, run or watch.
    #[arg(long)]
    pub dry_run: bool,

    /// Extra arguments passed to the supervised program.
    #[arg(last = true, value_name = "ARGS")]
    pub child_args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_args_are_collected_for_the_child() {
        let args = CliArgs::try_parse_from([
            "devloop", "--root", "/tmp/app", "--dry-run", "--", "--port", "8080",
        ])
        .unwrap();

        assert_eq!(args.root, Some(PathBuf::from("/tmp/app")));
        assert!(args.dry_run);
        assert_eq!(args.child_args, vec!["--port".to_string(), "8080".to_string()]);
    }
}
