//! Fixtures shared by the workspace integration tests

use phdf_runner_core::{RunnerConfig, StdioMode};
use serde_json::{Value, json};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config that runs `script` with `/bin/sh`, streams detached
pub fn shell_config(script: &Path) -> RunnerConfig {
    RunnerConfig {
        interpreter: "/bin/sh".to_string(),
        script: script.to_string_lossy().into_owned(),
        stdio: StdioMode::Null,
        ..RunnerConfig::default()
    }
}

/// Write a shell script the interpreter will receive as its first argument
pub fn write_script(dir: &Path, name: &str, body: &str) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

/// Write `value` as a `.txt` payload file, the suffix phdf uses to detect file input
pub fn write_payload_file(dir: &Path, name: &str, value: &Value) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}

/// Small device-pixel document in the shape phdf consumes
pub fn sample_payload() -> Value {
    json!({"partId1": {"R00C00": {"site1": {"aTB_0": "0.0"}}}})
}
