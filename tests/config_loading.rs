// tests/config_loading.rs
mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::init_tracing;

use std::io::Write;

use tempfile::NamedTempFile;

use devloop::config::{DEFAULT_CONFIG_FILE, load_and_validate, load_for_root};
use devloop::errors::DevloopError;
use devloop::types::RestartPolicy;

#[test]
fn full_config_file_is_parsed() {
    init_tracing();

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[config]
restart_policy = "serial"

[watch]
source_suffix = ".rs"
transient_marker = "~"

[build]
steps = [["cargo", "build", "--release"]]
env = {{ CARGO_TERM_COLOR = "always" }}

[run]
binary = "server"
args = ["--port", "8080"]
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.restart_policy, RestartPolicy::Serial);
    assert_eq!(cfg.watch.source_suffix, ".rs");
    assert_eq!(cfg.watch.transient_marker, "~");
    assert_eq!(cfg.build.steps, vec![vec!["cargo", "build", "--release"]]);
    assert_eq!(
        cfg.build.env.get("CARGO_TERM_COLOR").map(String::as_str),
        Some("always")
    );
    assert_eq!(cfg.run.binary.as_deref(), Some("server"));
    assert_eq!(cfg.run.args, vec!["--port", "8080"]);
}

#[test]
fn missing_default_file_means_defaults() {
    init_tracing();

    let root = tempfile::tempdir().unwrap();
    let cfg = load_for_root(root.path(), None).unwrap();

    assert_eq!(cfg.config.restart_policy, RestartPolicy::Coalesce);
    assert_eq!(cfg.watch.source_suffix, ".go");
    assert_eq!(cfg.build.steps.len(), 2);
}

#[test]
fn default_file_in_root_is_picked_up() {
    init_tracing();

    let root = tempfile::tempdir().unwrap();
    std::fs::write(
        root.path().join(DEFAULT_CONFIG_FILE),
        "[watch]\nsource_suffix = \".zig\"\n",
    )
    .unwrap();

    let cfg = load_for_root(root.path(), None).unwrap();
    assert_eq!(cfg.watch.source_suffix, ".zig");
    // Untouched sections keep their defaults.
    assert_eq!(cfg.watch.transient_marker, ".#");
}

#[test]
fn missing_explicit_file_is_a_config_error() {
    init_tracing();

    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("elsewhere.toml");

    match load_for_root(root.path(), Some(&missing)) {
        Err(DevloopError::ConfigError(msg)) => assert!(msg.contains("elsewhere.toml")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn invalid_policy_is_a_toml_error() {
    init_tracing();

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[config]\nrestart_policy = \"parallel\"\n").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(DevloopError::TomlError(_))
    ));
}

#[test]
fn builder_produces_validated_config() {
    let cfg = ConfigFileBuilder::new()
        .restart_policy(RestartPolicy::Serial)
        .source_suffix(".c")
        .transient_marker(".swp")
        .build_steps(&["make deps", "make"])
        .build_env("CFLAGS", "-O0")
        .binary("app")
        .run_arg("-v")
        .build();

    assert_eq!(cfg.build.steps, vec![vec!["make", "deps"], vec!["make"]]);
    assert_eq!(cfg.build.env.get("CFLAGS").map(String::as_str), Some("-O0"));
    assert_eq!(cfg.run.args, vec!["-v"]);
}
