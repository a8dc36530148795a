use std::fmt;

/// Status reported when the child could not be started
pub const LAUNCH_FAILURE_CODE: i32 = 1;
/// Status reported when the wait for the child was interrupted
pub const INTERRUPT_FAILURE_CODE: i32 = 2;

/// Outcome of one run.
///
/// A nonzero child exit is still `Success`: the runner does not interpret the
/// tool's exit codes. Match on the variant rather than comparing
/// [`status_code`](Self::status_code), since a child may exit with 1 or 2 too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success(i32),
    LaunchFailure(String),
    InterruptFailure(String),
}

impl ExecutionResult {
    pub fn status_code(&self) -> i32 {
        match self {
            ExecutionResult::Success(code) => *code,
            ExecutionResult::LaunchFailure(_) => LAUNCH_FAILURE_CODE,
            ExecutionResult::InterruptFailure(_) => INTERRUPT_FAILURE_CODE,
        }
    }

    /// The child ran to completion, whatever its exit code.
    pub fn is_completed(&self) -> bool {
        matches!(self, ExecutionResult::Success(_))
    }

    /// The child ran and exited with 0.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success(0))
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionResult::Success(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::Success(code) => write!(f, "completed with exitCode={code}"),
            ExecutionResult::LaunchFailure(reason) => write!(f, "failed to launch: {reason}"),
            ExecutionResult::InterruptFailure(reason) => write!(f, "interrupted: {reason}"),
        }
    }
}

/// Where a runner is in its current invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    CommandExtended,
    Launching,
    Running,
    Completed,
    LaunchFailed,
    Interrupted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::LaunchFailed | RunState::Interrupted
        )
    }
}

impl From<&ExecutionResult> for RunState {
    fn from(result: &ExecutionResult) -> Self {
        match result {
            ExecutionResult::Success(_) => RunState::Completed,
            ExecutionResult::LaunchFailure(_) => RunState::LaunchFailed,
            ExecutionResult::InterruptFailure(_) => RunState::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ExecutionResult::Success(42).status_code(), 42);
        assert_eq!(ExecutionResult::LaunchFailure("no such file".into()).status_code(), 1);
        assert_eq!(ExecutionResult::InterruptFailure("cancelled".into()).status_code(), 2);
    }

    #[test]
    fn test_nonzero_child_exit_is_completed_not_success() {
        let result = ExecutionResult::Success(1);
        assert!(result.is_completed());
        assert!(!result.is_success());
        assert_eq!(result.exit_code(), Some(1));
        assert_eq!(ExecutionResult::LaunchFailure(String::new()).exit_code(), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunState::from(&ExecutionResult::Success(0)).is_terminal());
        assert_eq!(
            RunState::from(&ExecutionResult::InterruptFailure(String::new())),
            RunState::Interrupted
        );
        assert!(!RunState::Running.is_terminal());
    }
}
