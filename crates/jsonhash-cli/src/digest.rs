//! # Digest Subcommand
//!
//! Prints one `<digest>  <path>` line per document, in argument order.
//! With no paths, reads a single document from standard input.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::batch::{read_document, BatchHasher, STDIN_PATH};
use crate::config::{CliConfig, HashSettings, HashingArgs};

/// Arguments for the `jsonhash digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Documents to hash (`-` for stdin).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub hashing: HashingArgs,
}

/// Execute the digest subcommand, writing results to `out`.
///
/// Returns exit code 0. Any unreadable or unhashable document aborts the
/// batch with an error.
pub fn run_digest(args: &DigestArgs, config: &CliConfig, out: &mut impl Write) -> Result<u8> {
    let settings = HashSettings::resolve(&args.hashing, config)?;
    let mut hasher = BatchHasher::new(&settings);

    let files = if args.files.is_empty() {
        vec![PathBuf::from(STDIN_PATH)]
    } else {
        args.files.clone()
    };

    tracing::info!(
        documents = files.len(),
        algorithm = %settings.algorithm,
        memoize = settings.memoize,
        "hashing documents"
    );

    for path in &files {
        let value = read_document(path, settings.format)?;
        let digest = hasher.calculate(&value)?;
        writeln!(out, "{digest}  {}", path.display())?;
    }

    hasher.log_stats();
    Ok(0)
}
