use std::io;
use std::path::PathBuf;

/// Errors that can occur while preparing a phdf-runner invocation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(
        "Inline payload is {len} bytes, above the {limit} byte limit; pass a file path instead"
    )]
    PayloadTooLarge { len: usize, limit: usize },

    #[error("Payload file not found: {}", .0.display())]
    PayloadFileMissing(PathBuf),

    #[error("Payload path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

/// Result type alias for phdf-runner operations
pub type Result<T> = std::result::Result<T, Error>;
