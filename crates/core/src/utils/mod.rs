pub mod file_reader;
pub mod serde_helpers;

pub use file_reader::{LINE_SEPARATOR, read_text_file};
