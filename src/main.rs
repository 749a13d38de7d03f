//! file-merge-sort: merge pre-sorted text files into one sorted file
//!
//! Usage: `file-merge-sort [-a|-d] (-s|-i) OUTPUT.txt INPUT.txt...`

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
