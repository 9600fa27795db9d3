// src/project.rs

//! Where the project lives and which binary a build produces.

use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::errors::{DevloopError, Result};

/// Resolved locations for one supervised project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    binary: PathBuf,
}

impl ProjectLayout {
    /// Resolve the project root (`root` or the current directory) and the
    /// path of the binary the build leaves behind in it.
    pub fn resolve(root: Option<&Path>, cfg: &ConfigFile) -> Result<Self> {
        let root = match root {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let root = root.canonicalize().map_err(|e| {
            DevloopError::ConfigError(format!("project root {}: {e}", root.display()))
        })?;

        let name = match cfg.run.binary {
            Some(ref name) => name.clone(),
            None => default_binary_name(&root)?,
        };
        let binary = root.join(executable_file_name(&name));

        Ok(Self { root, binary })
    }

    /// Build a layout without touching the filesystem.
    pub fn from_parts(root: impl Into<PathBuf>, binary: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            binary: binary.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

fn default_binary_name(root: &Path) -> Result<String> {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            DevloopError::ConfigError(format!(
                "cannot derive a binary name from project root {}; set [run].binary",
                root.display()
            ))
        })
}

/// Append the platform executable suffix (`.exe` on Windows, nothing elsewhere).
pub fn executable_file_name(name: &str) -> String {
    format!("{name}{}", std::env::consts::EXE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_is_named_after_the_root_directory() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("hello-server");
        std::fs::create_dir(&root).unwrap();

        let layout = ProjectLayout::resolve(Some(&root), &ConfigFile::default()).unwrap();
        let root = root.canonicalize().unwrap();

        assert_eq!(layout.root(), root.as_path());
        assert_eq!(
            layout.binary(),
            root.join(executable_file_name("hello-server")).as_path()
        );
    }

    #[test]
    fn configured_binary_name_wins() {
        let root = tempfile::tempdir().unwrap();
        let mut cfg = ConfigFile::default();
        cfg.run.binary = Some("app".to_string());

        let layout = ProjectLayout::resolve(Some(root.path()), &cfg).unwrap();
        assert_eq!(
            layout.binary().file_name().unwrap().to_string_lossy(),
            executable_file_name("app")
        );
    }

    #[test]
    fn missing_root_is_a_config_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("nope");
        assert!(matches!(
            ProjectLayout::resolve(Some(&missing), &ConfigFile::default()),
            Err(DevloopError::ConfigError(_))
        ));
    }

    #[cfg(windows)]
    #[test]
    fn windows_binaries_get_exe_suffix() {
        assert_eq!(executable_file_name("app"), "app.exe");
    }
}
