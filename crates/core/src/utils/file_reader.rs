//! Whole-file text loading with host line endings.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Read a text file into one string.
///
/// Every line, including the last one, is terminated with [`LINE_SEPARATOR`]
/// regardless of the endings used in the file. An empty file yields an empty
/// string.
pub fn read_text_file(path: &Path) -> Result<String> {
    tracing::debug!("Reading payload file: {:?}", path);

    let reader = BufReader::new(File::open(path)?);
    let mut contents = String::new();
    for line in reader.lines() {
        let line = line?;
        contents.push_str(line.strip_suffix('\r').unwrap_or(&line));
        contents.push_str(LINE_SEPARATOR);
    }

    tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
    Ok(contents)
}
