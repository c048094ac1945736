//! # Hash Function Abstraction
//!
//! The canonicalizer never names a concrete algorithm. Every leaf and every
//! combination step goes through a caller-supplied [`HashFunction`], so the
//! algorithm is swappable and tests can inject a trivial stub.
//!
//! `apply` takes `&mut self`. Stateless primitives ignore the mutability;
//! memoizing primitives use it to populate their cache, and the borrow
//! checker then rules out unsynchronized concurrent mutation of one instance.

use crate::digest::Digest;
use crate::error::HashError;

/// A one-way function from arbitrary text to a fixed-length digest.
///
/// Implementations must be deterministic: the same input always yields the
/// same digest for the lifetime of the instance.
pub trait HashFunction {
    /// Hash the UTF-8 bytes of `data`.
    fn apply(&mut self, data: &str) -> Result<Digest, HashError>;
}

impl<F> HashFunction for F
where
    F: FnMut(&str) -> Result<Digest, HashError>,
{
    fn apply(&mut self, data: &str) -> Result<Digest, HashError> {
        self(data)
    }
}
