use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::{
    command::CommandBuilder,
    error::{Error, Result},
    payload::DEFAULT_MAX_INLINE_BYTES,
    process::{RunOptions, StdioMode, options::DEFAULT_POLL_INTERVAL},
};

/// Names searched for in each directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = [".phdf-runner.json", "phdf-runner.json"];

/// Everything needed to launch the external tool.
///
/// Built once, then turned into a fresh [`CommandBuilder`] for every run, so
/// changing a path here always applies to the next launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RunnerConfig {
    pub interpreter: String,
    pub script: String,
    pub stdio: StdioMode,
    /// `null` in JSON disables the inline size check
    pub max_inline_bytes: Option<usize>,
    pub poll_interval_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            interpreter: home.join("anaconda3/bin/python").to_string_lossy().into_owned(),
            script: home.join("gitRepos/phdf/cli.py").to_string_lossy().into_owned(),
            stdio: StdioMode::Inherit,
            max_inline_bytes: Some(DEFAULT_MAX_INLINE_BYTES),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl RunnerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` to the first directory holding a config file.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config file above `start_path`, or the defaults.
    pub fn discover(start_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                debug!("Using config file: {:?}", path);
                Ok((Self::load_from_file(&path)?, Some(path)))
            }
            None => {
                debug!("No config file above {:?}, using defaults", start_path);
                Ok((Self::default(), None))
            }
        }
    }

    pub fn command_builder(&self) -> CommandBuilder {
        CommandBuilder::new(self.interpreter.as_str(), self.script.as_str())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions::default()
            .with_stdio(self.stdio)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
    }
}
