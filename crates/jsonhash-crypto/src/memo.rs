//! # Memoizing Hash Function
//!
//! Wraps another [`HashFunction`] behind an input→digest map. Documents
//! repeat leaf values and whole substructures often, and every repeat
//! becomes a map lookup instead of a digest computation.
//!
//! ## Lifetime
//!
//! The cache grows for as long as the instance lives and never evicts.
//! Treat an instance as a caller-owned resource for one batch of related
//! documents: construct, hash the batch, drop. For a long-lived cache shared
//! across threads use [`SharedMemoizingHash`](crate::SharedMemoizingHash),
//! which is bounded.
//!
//! ## Concurrency
//!
//! Not synchronized. `apply` takes `&mut self`, so sharing one instance
//! across threads requires the caller to wrap it in a lock.

use std::collections::HashMap;

use jsonhash_core::{Digest, HashError, HashFunction};

use crate::direct::DirectHash;

/// Hit/miss counters for a memoizing hash function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered from the cache.
    pub hits: u64,
    /// Calls that reached the inner hash function.
    pub misses: u64,
    /// Entries evicted to respect a capacity bound.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of calls answered from the cache, or 0 with no calls.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A hash function that remembers every digest it has produced.
#[derive(Debug, Clone, Default)]
pub struct MemoizingHash<H = DirectHash> {
    inner: H,
    cache: HashMap<String, Digest>,
    stats: CacheStats,
}

impl MemoizingHash<DirectHash> {
    /// Memoizing SHA-256.
    pub fn sha256() -> Self {
        Self::new(DirectHash::sha256())
    }
}

impl<H: HashFunction> MemoizingHash<H> {
    /// Memoize `inner`.
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Number of cached inputs.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Hit/miss counters since construction or the last [`clear`](Self::clear).
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every cached digest and reset the counters.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats = CacheStats::default();
    }

    /// Borrow the wrapped hash function.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Release the wrapped hash function, discarding the cache.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: HashFunction> HashFunction for MemoizingHash<H> {
    fn apply(&mut self, data: &str) -> Result<Digest, HashError> {
        if let Some(digest) = self.cache.get(data) {
            self.stats.hits += 1;
            return Ok(digest.clone());
        }
        // Failures propagate and are not cached.
        let digest = self.inner.apply(data)?;
        self.stats.misses += 1;
        self.cache.insert(data.to_owned(), digest.clone());
        Ok(digest)
    }
}
