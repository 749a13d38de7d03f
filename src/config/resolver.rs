//! Resolution of sort arguments into a [`Configuration`].

use clap::{Args, Parser};
use std::path::PathBuf;

use super::Settings;
use crate::domain::{Configuration, ElementType, SortDirection};
use crate::error::{MergeError, Result};

/// Sort flags and file arguments. Flags may be interleaved with files and the
/// last occurrence of each flag pair wins.
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Sort in ascending order (default)
    #[arg(short = 'a', overrides_with_all = ["ascending", "descending"])]
    pub ascending: bool,

    /// Sort in descending order
    #[arg(short = 'd', overrides_with_all = ["ascending", "descending"])]
    pub descending: bool,

    /// Compare lines as strings
    #[arg(short = 's', overrides_with_all = ["string", "integer"])]
    pub string: bool,

    /// Compare lines as integers
    #[arg(short = 'i', overrides_with_all = ["string", "integer"])]
    pub integer: bool,

    /// Output file followed by the input files to merge
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,
}

#[derive(Parser)]
#[command(no_binary_name = true, args_override_self = true)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct RawArgs {
    #[command(flatten)]
    sort: SortArgs,
}

/// Resolve a raw argument list, e.g. `["-i", "out.txt", "in1.txt", "in2.txt"]`.
pub fn resolve<I, T>(args: I, settings: &Settings) -> Result<Configuration>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let raw = RawArgs::try_parse_from(args)
        .map_err(|e| MergeError::configuration(e.to_string().trim_end()))?;
    resolve_args(raw.sort, settings)
}

/// Resolve already-parsed sort arguments.
pub fn resolve_args(args: SortArgs, settings: &Settings) -> Result<Configuration> {
    let element_type = if args.integer {
        ElementType::Integer
    } else if args.string {
        ElementType::String
    } else {
        return Err(MergeError::configuration("Data type is not specified"));
    };

    let sort_direction =
        if args.descending { SortDirection::Descending } else { SortDirection::Ascending };

    let mut files = args.files.into_iter().filter(|arg| {
        let is_file = settings.is_file_argument(arg);
        if !is_file {
            tracing::warn!(
                "Ignoring argument '{}': does not end with '{}'",
                arg,
                settings.file_suffix
            );
        }
        is_file
    });

    let output_path =
        files.next().map(PathBuf::from).ok_or_else(|| MergeError::configuration("Missing output file"))?;
    let input_paths: Vec<PathBuf> = files.map(PathBuf::from).collect();
    if input_paths.is_empty() {
        return Err(MergeError::configuration("Missing input file"));
    }

    Ok(Configuration { sort_direction, element_type, output_path, input_paths })
}
