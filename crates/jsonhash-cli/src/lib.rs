//! # jsonhash-cli — Command-Line Interface
//!
//! Computes order-insensitive digests of JSON and YAML documents.
//!
//! ## Subcommands
//!
//! - `jsonhash digest [FILE...]` — print `<digest>  <path>` per document.
//! - `jsonhash compare LEFT RIGHT` — exit 0 if equivalent, 1 otherwise.
//!
//! ```bash
//! jsonhash digest order.json order.yaml
//! jsonhash compare --memoize before.json after.json
//! cat order.json | jsonhash digest
//! ```
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers write to a caller-supplied writer so they can be tested
//!   without capturing stdout.

pub mod batch;
pub mod compare;
pub mod config;
pub mod digest;
