//! Comparator strategies.
//!
//! A strategy turns a line into a sort key; keys compare so that the line to
//! emit first is the smallest. Descending order wraps a strategy and reverses
//! its keys, so the engine only ever looks for the minimum.

use std::cmp::Reverse;
use std::num::ParseIntError;

pub trait LineOrder {
    type Key<'a>: Ord;

    /// Only numeric strategies can fail.
    fn key<'a>(&self, line: &'a str) -> Result<Self::Key<'a>, ParseIntError>;
}

/// Plain string comparison of the raw line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicographic;

impl LineOrder for Lexicographic {
    type Key<'a> = &'a str;

    fn key<'a>(&self, line: &'a str) -> Result<&'a str, ParseIntError> {
        Ok(line)
    }
}

/// Numeric comparison of lines holding signed integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

impl LineOrder for Numeric {
    type Key<'a> = i128;

    fn key<'a>(&self, line: &'a str) -> Result<i128, ParseIntError> {
        line.parse()
    }
}

/// Largest-first variant of another strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending<O>(pub O);

impl<O: LineOrder> LineOrder for Descending<O> {
    type Key<'a> = Reverse<O::Key<'a>>;

    fn key<'a>(&self, line: &'a str) -> Result<Self::Key<'a>, ParseIntError> {
        self.0.key(line).map(Reverse)
    }
}
