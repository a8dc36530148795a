//! Child process lifecycle: launch, wait, cancel, report

pub mod cancel;
pub mod options;
pub mod outcome;
pub mod runner;

pub use cancel::CancelToken;
pub use options::{RunOptions, StdioMode};
pub use outcome::{ExecutionResult, INTERRUPT_FAILURE_CODE, LAUNCH_FAILURE_CODE, RunState};
pub use runner::{ProcessRunner, execute};
