//! file-merge-sort: merge pre-sorted text files into one sorted output
//!
//! The library exposes the two halves of the tool: the configuration
//! resolver in [`config`] and the k-way merge engine in [`merge`].

pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod output;

pub use domain::{Configuration, ElementType, SortDirection};
pub use error::{MergeError, Result};
