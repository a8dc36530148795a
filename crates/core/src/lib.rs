//! phdf-runner - launch the phdf data-processing tool as a subprocess
//!
//! This crate provides functionality to:
//! - Assemble the tool's command line from an interpreter, a script and a request
//! - Run it with inherited standard streams and report a pass/fail outcome
//! - Load runner configuration and payload files
pub mod command;
pub mod config;
pub mod error;
pub mod payload;
pub mod process;
pub mod utils;

// Re-export commonly used types
pub use command::CommandBuilder;
pub use config::{ConfigOverrides, RunnerConfig};
pub use error::{Error, Result};
pub use payload::{DEFAULT_MAX_INLINE_BYTES, ExecutionRequest, Payload};
pub use process::{
    CancelToken, ExecutionResult, ProcessRunner, RunOptions, RunState, StdioMode, execute,
};
pub use utils::read_text_file;
