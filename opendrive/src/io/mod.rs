//! File input and output helpers for network data.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

pub mod xodr;

pub use xodr::{parse_xodr, read_xodr, write_xodr, write_xodr_string};

/// Reads a file to string.
pub fn read_to_string(path: impl AsRef<Path>) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_string(path: impl AsRef<Path>, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}
