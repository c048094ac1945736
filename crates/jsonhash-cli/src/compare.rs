//! # Compare Subcommand
//!
//! Decides whether two documents are equivalent up to key and element order
//! by comparing their digests.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::batch::{read_document, BatchHasher, STDIN_PATH};
use crate::config::{CliConfig, HashSettings, HashingArgs};

/// Arguments for the `jsonhash compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First document (`-` for stdin; at most one side may be stdin).
    #[arg(value_name = "LEFT")]
    pub left: PathBuf,

    /// Second document.
    #[arg(value_name = "RIGHT")]
    pub right: PathBuf,

    #[command(flatten)]
    pub hashing: HashingArgs,
}

/// Execute the compare subcommand.
///
/// Returns exit code 0 when the digests are equal and 1 when they differ.
pub fn run_compare(args: &CompareArgs, config: &CliConfig, out: &mut impl Write) -> Result<u8> {
    if args.left.as_os_str() == STDIN_PATH && args.right.as_os_str() == STDIN_PATH {
        bail!("standard input can supply only one side of a comparison");
    }
    let settings = HashSettings::resolve(&args.hashing, config)?;
    let mut hasher = BatchHasher::new(&settings);

    let left = hasher.calculate(&read_document(&args.left, settings.format)?)?;
    let right = hasher.calculate(&read_document(&args.right, settings.format)?)?;
    hasher.log_stats();

    if left == right {
        writeln!(out, "EQUAL {left}")?;
        Ok(0)
    } else {
        tracing::info!(left = %args.left.display(), right = %args.right.display(), "documents differ");
        writeln!(out, "DIFFERENT")?;
        writeln!(out, "  {left}  {}", args.left.display())?;
        writeln!(out, "  {right}  {}", args.right.display())?;
        Ok(1)
    }
}
