use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use phdf_runner::{
    Cli, Commands,
    commands::{RunArgs, config_command, init_command, run_command},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var; stdout belongs to phdf
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            data,
            output_dir,
            file,
            read,
            max_inline_bytes,
            no_inline_limit,
            dry_run,
            config,
        } => run_command(RunArgs {
            data,
            output_dir,
            file,
            read,
            max_inline_bytes,
            no_inline_limit,
            dry_run,
            config,
        }),
        Commands::Config { config } => config_command(&config),
        Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
    }
}
