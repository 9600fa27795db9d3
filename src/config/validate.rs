// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DevloopError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DevloopError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.watch, raw.build, raw.run))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watch(cfg)?;
    validate_build_steps(cfg)?;
    validate_run(cfg)?;
    Ok(())
}

fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.source_suffix.is_empty() {
        return Err(DevloopError::ConfigError(
            "[watch].source_suffix must not be empty".to_string(),
        ));
    }
    // An empty marker would be contained in every path and reject everything.
    if cfg.watch.transient_marker.is_empty() {
        return Err(DevloopError::ConfigError(
            "[watch].transient_marker must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_build_steps(cfg: &RawConfigFile) -> Result<()> {
    if cfg.build.steps.is_empty() {
        return Err(DevloopError::ConfigError(
            "[build].steps must contain at least one command".to_string(),
        ));
    }

    for (idx, step) in cfg.build.steps.iter().enumerate() {
        match step.first() {
            None => {
                return Err(DevloopError::ConfigError(format!(
                    "[build].steps[{idx}] is empty"
                )));
            }
            Some(program) if program.trim().is_empty() => {
                return Err(DevloopError::ConfigError(format!(
                    "[build].steps[{idx}] has an empty program name"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn validate_run(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref binary) = cfg.run.binary {
        if binary.is_empty() || binary.contains('/') || binary.contains('\\') {
            return Err(DevloopError::ConfigError(format!(
                "[run].binary must be a plain file name inside the project root (got {binary:?})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<ConfigFile> {
        let raw: RawConfigFile = toml::from_str(toml_src)?;
        ConfigFile::try_from(raw)
    }

    #[test]
    fn empty_file_yields_go_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.watch.source_suffix, ".go");
        assert_eq!(cfg.watch.transient_marker, ".#");
        assert_eq!(cfg.build.steps.len(), 2);
        assert_eq!(cfg.build.steps[0], vec!["go", "install"]);
        assert_eq!(cfg.build.steps[1], vec!["go", "build"]);
        assert_eq!(cfg.build.env.get("GOGC").map(String::as_str), Some("off"));
        assert!(cfg.run.binary.is_none());
    }

    #[test]
    fn empty_step_is_rejected() {
        let err = parse("[build]\nsteps = [[\"make\"], []]\n").unwrap_err();
        match err {
            DevloopError::ConfigError(msg) => assert!(msg.contains("steps[1]")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn no_steps_is_rejected() {
        assert!(matches!(
            parse("[build]\nsteps = []\n"),
            Err(DevloopError::ConfigError(_))
        ));
    }

    #[test]
    fn empty_suffix_is_rejected() {
        assert!(matches!(
            parse("[watch]\nsource_suffix = \"\"\n"),
            Err(DevloopError::ConfigError(_))
        ));
    }

    #[test]
    fn binary_with_separator_is_rejected() {
        assert!(matches!(
            parse("[run]\nbinary = \"bin/app\"\n"),
            Err(DevloopError::ConfigError(_))
        ));
    }

    #[test]
    fn unknown_keys_are_a_toml_error() {
        assert!(matches!(
            parse("[watch]\nsuffix = \".rs\"\n"),
            Err(DevloopError::TomlError(_))
        ));
    }
}
