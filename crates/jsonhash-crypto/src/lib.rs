//! # jsonhash-crypto — Hash Primitives
//!
//! Concrete [`HashFunction`](jsonhash_core::HashFunction) realizations for
//! the canonicalizer in `jsonhash-core`:
//!
//! - **`DirectHash`** — stateless SHA-256 / SHA-512, lowercase hex output.
//! - **`MemoizingHash`** — unbounded input→digest cache around any hash
//!   function, for one batch of documents on one thread.
//! - **`SharedMemoizingHash`** — capacity-bounded cache shared by cloneable,
//!   thread-safe handles, for long-lived use.
//!
//! ## Crate Policy
//!
//! - Depends only on `jsonhash-core` internally.
//! - No mocking of digests in the realizations' own tests: SHA-2 output is
//!   checked against published vectors.
//! - No `unsafe` code.

pub mod direct;
pub mod memo;
pub mod shared;

pub use direct::{sha256_hex, DigestAlgorithm, DirectHash};
pub use memo::{CacheStats, MemoizingHash};
pub use shared::{SharedMemoizingHash, DEFAULT_CACHE_CAPACITY};
