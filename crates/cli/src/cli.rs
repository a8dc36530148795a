use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use phdf_runner_core::{ConfigOverrides, RunnerConfig, StdioMode};
use std::env;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "phdf-runner")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run phdf on a JSON payload
    #[command(visible_alias = "r")]
    Run {
        /// Literal JSON text, or a payload file path with --file/--read
        data: String,

        /// Directory phdf writes its output into
        output_dir: String,

        /// Treat DATA as a payload file path and pass the path to phdf
        #[arg(short, long, conflicts_with = "read")]
        file: bool,

        /// Read the DATA file and pass its contents to phdf as literal JSON
        #[arg(long)]
        read: bool,

        /// Refuse inline payloads larger than this many bytes
        #[arg(long)]
        max_inline_bytes: Option<usize>,

        /// Send inline payloads of any size
        #[arg(long, conflicts_with = "max_inline_bytes")]
        no_inline_limit: bool,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the resolved configuration as JSON
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Write a default .phdf-runner.json
    Init {
        /// Directory to write the config into (defaults to current directory)
        #[arg(short, long)]
        cwd: Option<String>,

        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Settings shared by every command that launches or inspects phdf
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Config file to load instead of searching upward from the current directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interpreter used to run the phdf script
    #[arg(long, visible_alias = "python")]
    pub interpreter: Option<String>,

    /// Path of the phdf script
    #[arg(long, visible_alias = "cli-path", allow_hyphen_values = true)]
    pub script: Option<String>,

    /// Wiring of the child's standard streams: inherit or null
    #[arg(long)]
    pub stdio: Option<StdioMode>,
}

impl ConfigArgs {
    /// Load the config file (explicit or discovered) and layer the flags on top.
    pub fn resolve(&self, max_inline_bytes: Option<Option<usize>>) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                let (config, source) = RunnerConfig::discover(&cwd)?;
                if let Some(source) = source {
                    info!("Loaded config from {}", source.display());
                }
                config
            }
        };

        ConfigOverrides {
            interpreter: self.interpreter.clone(),
            script: self.script.clone(),
            stdio: self.stdio,
            max_inline_bytes,
        }
        .apply(&mut config);

        Ok(config)
    }
}
