//! Core value types shared by the resolver and the merge engine.

use std::path::PathBuf;

/// Order in which merged lines are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// How a line is interpreted for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Lexicographic comparison of the raw text
    String,
    /// Numeric comparison after parsing the line as a signed integer
    Integer,
}

/// Fully resolved run configuration.
///
/// Built once by [`crate::config::resolve`] and never mutated afterwards.
/// `input_paths` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub sort_direction: SortDirection,
    pub element_type: ElementType,
    pub output_path: PathBuf,
    pub input_paths: Vec<PathBuf>,
}
