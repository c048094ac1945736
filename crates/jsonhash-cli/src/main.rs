//! # jsonhash CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsonhash_cli::compare::{run_compare, CompareArgs};
use jsonhash_cli::config::CliConfig;
use jsonhash_cli::digest::{run_digest, DigestArgs};

/// Order-insensitive digests for JSON and YAML documents.
///
/// Two documents that differ only in key order or array element order get
/// the same digest.
#[derive(Parser, Debug)]
#[command(name = "jsonhash", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the digest of each document.
    Digest(DigestArgs),

    /// Check whether two documents have the same digest.
    Compare(CompareArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("jsonhash CLI starting");

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| {
        let mut stdout = std::io::stdout().lock();
        match &cli.command {
            Commands::Digest(args) => run_digest(args, &config, &mut stdout),
            Commands::Compare(args) => run_compare(args, &config, &mut stdout),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
