pub mod command_breakdown;

pub use command_breakdown::{payload_preview, print_command_breakdown};
