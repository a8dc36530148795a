//! Launches the assembled command and waits for it

use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::{CancelToken, ExecutionResult, RunOptions, RunState};
use crate::command::CommandBuilder;
use crate::config::RunnerConfig;
use crate::error::Result;
use crate::payload::ExecutionRequest;

/// Runs the external tool once per [`run`](Self::run) call.
///
/// `run` takes `&mut self`, so extending the command and spawning from it
/// cannot interleave with another caller. Share an instance across threads
/// only behind a `Mutex`; separate instances are independent.
#[derive(Debug)]
pub struct ProcessRunner {
    command: CommandBuilder,
    options: RunOptions,
    cancel: CancelToken,
    state: RunState,
}

impl ProcessRunner {
    pub fn new(command: CommandBuilder) -> Self {
        Self {
            command,
            options: RunOptions::default(),
            cancel: CancelToken::new(),
            state: RunState::Idle,
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn command(&self) -> &CommandBuilder {
        &self.command
    }

    pub fn command_mut(&mut self) -> &mut CommandBuilder {
        &mut self.command
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Append the request to the command, launch it and block until the
    /// child exits.
    ///
    /// Tokens appended by earlier runs stay in place; call
    /// [`CommandBuilder::reset`] through [`command_mut`](Self::command_mut)
    /// to start from the bare prefix again.
    pub fn run(&mut self, payload: &str, target_dir: &str) -> ExecutionResult {
        self.state = RunState::Idle;
        self.command.extend_with_request(payload, target_dir);
        self.state = RunState::CommandExtended;

        info!(
            " >> calling subprocess phdf (data.length={}) {}",
            payload.len(),
            target_dir
        );

        let result = self.launch();
        self.state = RunState::from(&result);

        match &result {
            ExecutionResult::Success(code) => info!(" >> phdf completed with exitCode={}", code),
            ExecutionResult::LaunchFailure(reason) => error!("Failed to launch phdf: {}", reason),
            ExecutionResult::InterruptFailure(reason) => warn!("phdf wait interrupted: {}", reason),
        }

        result
    }

    fn launch(&mut self) -> ExecutionResult {
        self.state = RunState::Launching;
        debug!("Launching: {}", self.command.to_shell_command());

        let mut child = match spawn(&self.command, &self.options) {
            Ok(child) => child,
            Err(reason) => {
                self.cancel.take();
                return ExecutionResult::LaunchFailure(reason);
            }
        };

        self.state = RunState::Running;
        debug!("Child process started with pid {}", child.id());

        wait_for_exit(&mut child, &self.cancel, self.options.poll_interval)
    }
}

/// Validate a request against `config` and run it with a fresh command.
///
/// Unlike [`ProcessRunner`], nothing carries over between calls: the command
/// is rebuilt from the configuration each time.
pub fn execute(
    config: &RunnerConfig,
    request: &ExecutionRequest,
    cancel: &CancelToken,
) -> Result<ExecutionResult> {
    request.validate(config.max_inline_bytes)?;

    let mut runner = ProcessRunner::new(config.command_builder())
        .with_options(config.run_options())
        .with_cancel_token(cancel.clone());

    Ok(runner.run(&request.payload.as_arg(), &request.target_dir))
}

fn spawn(command: &CommandBuilder, options: &RunOptions) -> std::result::Result<Child, String> {
    let (program, args) = command.argv().map_err(|e| e.to_string())?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    options.stdio.apply(&mut cmd);

    cmd.spawn().map_err(|e| format!("{program}: {e}"))
}

fn wait_for_exit(child: &mut Child, cancel: &CancelToken, poll_interval: Duration) -> ExecutionResult {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let code = exit_code(status);
                if cancel.take() {
                    return ExecutionResult::InterruptFailure(format!(
                        "cancelled while waiting for child process {} (it exited with {code})",
                        child.id()
                    ));
                }
                return ExecutionResult::Success(code);
            }
            Ok(None) => {}
            Err(e) => {
                cancel.take();
                terminate(child);
                return ExecutionResult::InterruptFailure(format!("wait failed: {e}"));
            }
        }

        if cancel.take() {
            let pid = child.id();
            terminate(child);
            return ExecutionResult::InterruptFailure(format!(
                "cancelled while waiting for child process {pid}"
            ));
        }

        thread::sleep(poll_interval);
    }
}

/// Best-effort kill and reap, so an interrupted run leaves no orphan behind.
fn terminate(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("kill({}) failed: {}", child.id(), e);
    }
    if let Err(e) = child.wait() {
        warn!("Failed to reap child {}: {}", child.id(), e);
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(UNKNOWN_EXIT_CODE)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(UNKNOWN_EXIT_CODE)
}

// Only reachable if the platform reports neither a code nor a signal.
const UNKNOWN_EXIT_CODE: i32 = 1;

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::payload::Payload;
    use crate::process::StdioMode;
    use std::fs;
    use std::time::Instant;
    use tempfile::TempDir;

    fn sh_runner() -> ProcessRunner {
        ProcessRunner::new(CommandBuilder::new("/bin/sh", "-c"))
            .with_options(RunOptions::default().with_stdio(StdioMode::Null))
    }

    #[test]
    fn test_child_exit_codes_pass_through() {
        for code in [0, 1, 42] {
            let mut runner = sh_runner();
            let result = runner.run(&format!("exit {code}"), "/tmp");
            assert_eq!(result, ExecutionResult::Success(code));
            assert_eq!(runner.state(), RunState::Completed);
        }
    }

    #[test]
    fn test_empty_script_token_reaches_child() {
        let mut runner = ProcessRunner::new(CommandBuilder::new("/usr/bin/env", ""))
            .with_options(RunOptions::default().with_stdio(StdioMode::Null));
        // env "" true /tmp: env is asked to run a program named ""
        let result = runner.run("true", "/tmp");
        assert_eq!(result, ExecutionResult::Success(127));
    }

    #[test]
    fn test_cancel_after_child_exit_is_consumed_by_that_run() {
        let cancel = CancelToken::new();
        let mut runner = sh_runner()
            .with_cancel_token(cancel.clone())
            .with_options(
                RunOptions::default()
                    .with_stdio(StdioMode::Null)
                    .with_poll_interval(Duration::from_millis(500)),
            );

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            cancel.cancel();
        });
        let result = runner.run("sleep 0.1", "/tmp");
        canceller.join().unwrap();

        assert!(matches!(result, ExecutionResult::InterruptFailure(_)));
        assert!(!runner.cancel_token().is_cancelled());

        runner.command_mut().reset();
        assert_eq!(runner.run("sleep 0.3", "/tmp"), ExecutionResult::Success(0));
    }

    #[test]
    fn test_launch_failure_clears_pending_cancel() {
        let cancel = CancelToken::new();
        let mut runner = ProcessRunner::new(CommandBuilder::new("/no/such/binary", ""))
            .with_cancel_token(cancel.clone());
        cancel.cancel();

        assert!(matches!(runner.run("x", "y"), ExecutionResult::LaunchFailure(_)));
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn test_missing_interpreter_is_launch_failure() {
        let mut runner = ProcessRunner::new(CommandBuilder::new("/no/such/binary", ""));
        let started = Instant::now();
        let result = runner.run("x", "y");

        match result {
            ExecutionResult::LaunchFailure(reason) => assert!(reason.contains("/no/such/binary")),
            other => panic!("expected LaunchFailure, got {other:?}"),
        }
        assert_eq!(runner.state(), RunState::LaunchFailed);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_empty_interpreter_is_launch_failure() {
        let mut runner = ProcessRunner::new(CommandBuilder::new("", "cli.py"));
        assert!(matches!(
            runner.run("x", "y"),
            ExecutionResult::LaunchFailure(_)
        ));
    }

    #[test]
    fn test_signal_exit_maps_to_shell_convention() {
        let mut runner = sh_runner();
        let result = runner.run("kill -TERM $$", "/tmp");
        assert_eq!(result, ExecutionResult::Success(128 + 15));
    }

    #[test]
    fn test_cancel_interrupts_and_kills_child() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join("finished");

        let cancel = CancelToken::new();
        let mut runner = sh_runner().with_cancel_token(cancel.clone());

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            cancel.cancel();
        });

        let started = Instant::now();
        let script = format!("sleep 3; touch '{}'", marker.display());
        let result = runner.run(&script, "/tmp");
        canceller.join().unwrap();

        assert!(matches!(result, ExecutionResult::InterruptFailure(_)));
        assert_eq!(result.status_code(), 2);
        assert_eq!(runner.state(), RunState::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(!runner.cancel_token().is_cancelled());

        thread::sleep(Duration::from_millis(3200));
        assert!(!marker.exists(), "interrupted child kept running");
    }

    #[test]
    fn test_runs_accumulate_tokens() {
        let mut runner = sh_runner();
        runner.run("exit 0", "first");
        runner.run("exit 0", "second");
        assert_eq!(
            runner.command().current_command(),
            &["/bin/sh", "-c", "exit 0", "first", "exit 0", "second"]
        );

        runner.command_mut().reset();
        assert_eq!(runner.command().current_command().len(), 2);
    }

    #[test]
    fn test_sequential_runs_do_not_overlap() {
        let temp_dir = TempDir::new().unwrap();
        let log = temp_dir.path().join("timeline.log");
        let log_arg = log.to_string_lossy().to_string();
        let script = r#"echo start >> "$0"; sleep 0.2; echo end >> "$0""#;

        // Extra tokens from earlier runs land after $0 and are ignored by sh -c
        let mut runner = sh_runner();
        for _ in 0..3 {
            assert_eq!(runner.run(script, &log_arg), ExecutionResult::Success(0));
        }

        let lines: Vec<String> = fs::read_to_string(&log)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines, ["start", "end", "start", "end", "start", "end"]);
    }

    #[test]
    fn test_execute_rejects_oversized_inline_payload() {
        let config = RunnerConfig {
            interpreter: "/bin/sh".to_string(),
            script: "-c".to_string(),
            max_inline_bytes: Some(4),
            ..RunnerConfig::default()
        };
        let request = ExecutionRequest::new(Payload::inline("exit 0"), "/tmp");

        let err = execute(&config, &request, &CancelToken::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::PayloadTooLarge { len: 6, limit: 4 }
        ));
    }

    #[test]
    fn test_execute_builds_fresh_command_each_time() {
        let config = RunnerConfig {
            interpreter: "/bin/sh".to_string(),
            script: "-c".to_string(),
            stdio: StdioMode::Null,
            ..RunnerConfig::default()
        };
        let cancel = CancelToken::new();

        for code in [3, 4] {
            let request = ExecutionRequest::new(Payload::inline(format!("exit {code}")), "/tmp");
            let result = execute(&config, &request, &cancel).unwrap();
            assert_eq!(result, ExecutionResult::Success(code));
        }
    }
}
