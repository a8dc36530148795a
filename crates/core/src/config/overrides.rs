//! Command-line values layered over a loaded configuration

use super::RunnerConfig;
use crate::process::StdioMode;
use tracing::debug;

/// Values that replace config-file settings when present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub interpreter: Option<String>,
    pub script: Option<String>,
    pub stdio: Option<StdioMode>,
    /// `Some(None)` removes the inline limit
    pub max_inline_bytes: Option<Option<usize>>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, config: &mut RunnerConfig) {
        if let Some(interpreter) = self.interpreter {
            debug!("Overriding interpreter: {}", interpreter);
            config.interpreter = interpreter;
        }
        if let Some(script) = self.script {
            debug!("Overriding script: {}", script);
            config.script = script;
        }
        if let Some(stdio) = self.stdio {
            config.stdio = stdio;
        }
        if let Some(limit) = self.max_inline_bytes {
            config.max_inline_bytes = limit;
        }
    }
}
