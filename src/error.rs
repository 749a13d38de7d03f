//! Error taxonomy for resolving and merging.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = MergeError> = std::result::Result<T, E>;

/// Every failure is terminal; nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// Missing or invalid arguments, raised before any file is touched
    #[error("{0}")]
    Configuration(String),

    /// An input file could not be opened or read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid integer while merging in integer mode
    #[error("For input string: \"{line}\" ({}:{line_number}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        line_number: usize,
        line: String,
        #[source]
        source: ParseIntError,
    },
}

impl MergeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
