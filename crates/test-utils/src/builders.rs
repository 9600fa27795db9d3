use devloop::config::{ConfigFile, RawConfigFile};
use devloop::types::RestartPolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.config.config.restart_policy = policy;
        self
    }

    pub fn source_suffix(mut self, suffix: &str) -> Self {
        self.config.watch.source_suffix = suffix.to_string();
        self
    }

    pub fn transient_marker(mut self, marker: &str) -> Self {
        self.config.watch.transient_marker = marker.to_string();
        self
    }

    /// Replace the default build steps. Each step is `program arg...`,
    /// split on whitespace.
    pub fn build_steps(mut self, steps: &[&str]) -> Self {
        self.config.build.steps = steps
            .iter()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .collect();
        self
    }

    pub fn build_env(mut self, key: &str, value: &str) -> Self {
        self.config.build.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn binary(mut self, name: &str) -> Self {
        self.config.run.binary = Some(name.to_string());
        self
    }

    pub fn run_arg(mut self, arg: &str) -> Self {
        self.config.run.args.push(arg.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
