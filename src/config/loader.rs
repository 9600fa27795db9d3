// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DevloopError, Result};

/// File name looked up in the project root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "Devloop.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the configuration for a project.
///
/// - An explicit path must exist.
/// - Without one, `<root>/Devloop.toml` is used if present, otherwise the
///   built-in defaults.
pub fn load_for_root(root: &Path, explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(DevloopError::ConfigError(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return load_and_validate(path);
    }

    let default_path: PathBuf = root.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        debug!(path = %default_path.display(), "loading project config");
        load_and_validate(&default_path)
    } else {
        debug!("no {DEFAULT_CONFIG_FILE} in project root; using defaults");
        Ok(ConfigFile::default())
    }
}
