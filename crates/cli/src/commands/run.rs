use anyhow::{Context, Result};
use phdf_runner_core::{
    CancelToken, ExecutionRequest, ExecutionResult, Payload, RunnerConfig, execute,
};
use std::path::Path;
use tracing::{debug, warn};

use crate::cli::ConfigArgs;
use crate::display::print_command_breakdown;

pub struct RunArgs {
    pub data: String,
    pub output_dir: String,
    pub file: bool,
    pub read: bool,
    pub max_inline_bytes: Option<usize>,
    pub no_inline_limit: bool,
    pub dry_run: bool,
    pub config: ConfigArgs,
}

impl RunArgs {
    fn limit_override(&self) -> Option<Option<usize>> {
        if self.no_inline_limit {
            Some(None)
        } else {
            self.max_inline_bytes.map(Some)
        }
    }

    fn payload(&self) -> Result<Payload> {
        if self.read {
            Payload::from_file_contents(Path::new(&self.data))
                .with_context(|| format!("Failed to read payload file {}", self.data))
        } else if self.file {
            Ok(Payload::file(&self.data))
        } else {
            Ok(Payload::inline(self.data.as_str()))
        }
    }
}

pub fn run_command(args: RunArgs) -> Result<()> {
    let config = args.config.resolve(args.limit_override())?;
    let request = ExecutionRequest::new(args.payload()?, args.output_dir.as_str());

    debug!("Resolved config: {:?}", config);

    if args.dry_run {
        request.validate(config.max_inline_bytes)?;
        print_dry_run(&config, &request);
        return Ok(());
    }

    let cancel = CancelToken::new();
    if let Err(e) = cancel.install_ctrlc_handler() {
        warn!("Ctrl+C will not interrupt the run: {}", e);
    }

    let result = execute(&config, &request, &cancel)?;

    match &result {
        ExecutionResult::Success(_) => {}
        ExecutionResult::LaunchFailure(reason) => {
            eprintln!("❌ Failed to launch phdf: {reason}");
        }
        ExecutionResult::InterruptFailure(reason) => {
            eprintln!("⚠️  phdf run interrupted: {reason}");
        }
    }

    let code = result.status_code();
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

fn print_dry_run(config: &RunnerConfig, request: &ExecutionRequest) {
    let mut command = config.command_builder();
    command.extend_with_request(request.payload.as_arg(), request.target_dir.as_str());

    print_command_breakdown(&command, &request.payload);
    println!("\n🎯 Command to run:");
    println!("   {}", command.to_shell_command());
}
