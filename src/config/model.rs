// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::RestartPolicy;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// restart_policy = "coalesce"
///
/// [watch]
/// source_suffix = ".go"
/// transient_marker = ".#"
///
/// [build]
/// steps = [["go", "install"], ["go", "build"]]
/// env = { GOGC = "off" }
///
/// [run]
/// args = ["--port", "8080"]
/// ```
///
/// Every section is optional; the defaults describe a Go project built with
/// `go install` + `go build`, with the garbage collector disabled during the
/// build.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub run: RunSection,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`], so holders can rely on the invariants checked
/// there.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub watch: WatchSection,
    pub build: BuildSection,
    pub run: RunSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        watch: WatchSection,
        build: BuildSection,
        run: RunSection,
    ) -> Self {
        Self {
            config,
            watch,
            build,
            run,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.config, raw.watch, raw.build, raw.run)
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// `"coalesce"` (default) or `"serial"`.
    #[serde(default)]
    pub restart_policy: RestartPolicy,
}

/// `[watch]` section: which change events count as rebuild triggers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Only paths ending in this suffix can trigger a rebuild.
    #[serde(default = "default_source_suffix")]
    pub source_suffix: String,

    /// Paths containing this substring are editor swap/lock files and never
    /// trigger.
    #[serde(default = "default_transient_marker")]
    pub transient_marker: String,
}

fn default_source_suffix() -> String {
    ".go".to_string()
}

fn default_transient_marker() -> String {
    ".#".to_string()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            source_suffix: default_source_suffix(),
            transient_marker: default_transient_marker(),
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Commands run in order from the project root, each as `[program, args...]`.
    #[serde(default = "default_build_steps")]
    pub steps: Vec<Vec<String>>,

    /// Environment overrides for the build steps only.
    #[serde(default = "default_build_env")]
    pub env: BTreeMap<String, String>,
}

fn default_build_steps() -> Vec<Vec<String>> {
    vec![
        vec!["go".to_string(), "install".to_string()],
        vec!["go".to_string(), "build".to_string()],
    ]
}

fn default_build_env() -> BTreeMap<String, String> {
    BTreeMap::from([("GOGC".to_string(), "off".to_string())])
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            steps: default_build_steps(),
            env: default_build_env(),
        }
    }
}

/// `[run]` section: how to start the freshly built program.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Binary file name inside the project root. Defaults to the root
    /// directory's base name; the platform executable suffix is appended.
    #[serde(default)]
    pub binary: Option<String>,

    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,
}
