//! Configuration loading and argument resolution
//!
//! Tool settings come from an optional settings file, environment variables, and
//! CLI flags with the usual precedence (CLI > Env > File > Defaults). The
//! resolver then turns the sort arguments into a [`crate::Configuration`]
//! without touching the filesystem.

pub mod loader;
pub mod resolver;

pub use loader::{load_settings, Settings};
pub use resolver::{resolve, resolve_args, SortArgs};
