pub mod config;
pub mod init;
pub mod run;

pub use config::config_command;
pub use init::init_command;
pub use run::{RunArgs, run_command};
