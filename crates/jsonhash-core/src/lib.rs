//! # jsonhash-core — Structural Fingerprints for JSON-like Documents
//!
//! Computes a deterministic digest of a parsed document such that two
//! documents differing only in key order or array element order produce the
//! same digest. Intended for change detection, deduplication, and equality
//! checks without comparing the documents themselves.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value model.** `JsonValue` has exactly four variants (null,
//!    scalar, sequence, mapping). Every consumer matches exhaustively; inputs
//!    outside the model are rejected at the decode boundary.
//!
//! 2. **Injected hash function.** The canonicalizer takes any
//!    [`HashFunction`]; the algorithm is never fixed at compile time. Concrete
//!    SHA-2 and memoizing realizations live in `jsonhash-crypto`.
//!
//! 3. **Sort, concatenate, rehash.** Collections fold their child digests by
//!    sorting them, concatenating, and hashing the result with the same
//!    primitive used for leaves.
//!
//! 4. **Bounded stack.** Traversal runs on a heap stack, with an optional
//!    depth limit, so adversarial nesting cannot exhaust the call stack.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsonhash-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod decode;
pub mod digest;
pub mod error;
pub mod hash;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use canonical::{calculate, calculate_with, HashOptions, JsonHash, DEFAULT_MAX_DEPTH};
pub use decode::{from_json_reader, from_json_slice, from_json_str, from_yaml_str, DocumentFormat};
pub use digest::Digest;
pub use error::{HashError, JsonHashError};
pub use hash::HashFunction;
pub use value::JsonValue;
