use std::process::{Command, Stdio};
use std::time::Duration;

use crate::impl_case_insensitive_serde;

/// How the child's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// stdin, stdout and stderr are the parent's own streams
    #[default]
    Inherit,
    /// All three streams are connected to the null device
    Null,
}

impl_case_insensitive_serde!(
    StdioMode,
    Inherit => "inherit",
    Null => "null"
);

impl StdioMode {
    pub fn apply(self, cmd: &mut Command) {
        match self {
            StdioMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            StdioMode::Null => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());
            }
        }
    }
}

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Knobs for a single launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub stdio: StdioMode,
    /// How often the waiting thread checks for exit and cancellation
    pub poll_interval: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            stdio: StdioMode::Inherit,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl RunOptions {
    pub fn with_stdio(mut self, stdio: StdioMode) -> Self {
        self.stdio = stdio;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(Duration::from_millis(1));
        self
    }
}
