//! Execution requests and the inline payload size policy

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::read_text_file;

/// Largest inline payload accepted by default.
///
/// Linux caps a single argument at 128 KiB; staying below it leaves room
/// for the rest of the command line.
pub const DEFAULT_MAX_INLINE_BYTES: usize = 120 * 1024;

/// Data handed to the external tool as its first argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Literal JSON text
    Inline(String),
    /// Path to a file holding the JSON text
    File(PathBuf),
}

impl Payload {
    pub fn inline(text: impl Into<String>) -> Self {
        Payload::Inline(text.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Payload::File(path.into())
    }

    /// Load `path` and pass its contents literally instead of its path.
    pub fn from_file_contents(path: &Path) -> Result<Self> {
        Ok(Payload::Inline(read_text_file(path)?))
    }

    pub fn as_arg(&self) -> Cow<'_, str> {
        match self {
            Payload::Inline(text) => Cow::Borrowed(text),
            Payload::File(path) => path.to_string_lossy(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Payload::Inline(_))
    }
}

/// A payload together with the directory the tool writes into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub payload: Payload,
    pub target_dir: String,
}

impl ExecutionRequest {
    pub fn new(payload: Payload, target_dir: impl Into<String>) -> Self {
        Self {
            payload,
            target_dir: target_dir.into(),
        }
    }

    /// Check the request before anything is launched.
    ///
    /// Inline payloads above `max_inline_bytes` are refused rather than sent
    /// to fail inside the OS; `None` disables the limit. File payloads must
    /// name an existing file by a UTF-8 path, since tokens are strings.
    pub fn validate(&self, max_inline_bytes: Option<usize>) -> Result<()> {
        match &self.payload {
            Payload::Inline(text) => match max_inline_bytes {
                Some(limit) if text.len() > limit => Err(Error::PayloadTooLarge {
                    len: text.len(),
                    limit,
                }),
                _ => Ok(()),
            },
            Payload::File(path) if path.to_str().is_none() => {
                Err(Error::NonUtf8Path(path.clone()))
            }
            Payload::File(path) if !path.is_file() => {
                Err(Error::PayloadFileMissing(path.clone()))
            }
            Payload::File(_) => Ok(()),
        }
    }
}
