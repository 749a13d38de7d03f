//! Writing merged lines, or the error that replaced them, to the output file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MergeError, Result};

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Create or truncate `path` and write one record per line.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let to_error = |source| MergeError::Write { path: path.to_path_buf(), source };

    let mut writer = BufWriter::new(File::create(path).map_err(to_error)?);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).map_err(to_error)?;
        writer.write_all(LINE_SEPARATOR.as_bytes()).map_err(to_error)?;
    }
    writer.flush().map_err(to_error)
}

/// Replace the contents of `path` with the message of `err`.
pub fn write_error(path: &Path, err: &MergeError) -> Result<()> {
    write_lines(path, &[err.to_string()])
}
