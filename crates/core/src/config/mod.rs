//! Configuration management for phdf-runner

pub mod overrides;
mod settings;

pub use overrides::ConfigOverrides;
pub use settings::{CONFIG_FILE_NAMES, RunnerConfig};
