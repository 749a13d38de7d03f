//! Command-line interface for file-merge-sort
//!
//! Parses the sort flags, loads tool settings, and runs the merge. Errors raised
//! while merging are written into the output file in place of the merged lines.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use file_merge_sort::config::{load_settings, resolve_args, SortArgs};
use file_merge_sort::merge::merge_files;
use file_merge_sort::output::{write_error, write_lines};
use file_merge_sort::Configuration;

/// Merge pre-sorted text files into a single sorted file
#[derive(Parser)]
#[command(name = "file-merge-sort")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    #[command(flatten)]
    sort: SortArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,

    /// Settings file (TOML or YAML); discovered in the working directory if omitted
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suffix that marks an argument as a file path [default: .txt]
    #[arg(long, value_name = "SUFFIX", env = "FILE_MERGE_SORT_SUFFIX")]
    suffix: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let mut settings = load_settings(&cwd, cli.config.as_deref())?;
    if let Some(suffix) = cli.suffix.as_deref() {
        settings = settings.with_suffix(suffix);
    }

    let config = resolve_args(cli.sort, &settings)?;
    sort_into_output(&config)
}

fn sort_into_output(config: &Configuration) -> Result<()> {
    let result =
        merge_files(config).and_then(|lines| write_lines(&config.output_path, &lines));

    if let Err(err) = result {
        tracing::warn!("Merge failed: {}", err);
        write_error(&config.output_path, &err).with_context(|| {
            format!("Failed to report error to {}: {}", config.output_path.display(), err)
        })?;
    }

    Ok(())
}
