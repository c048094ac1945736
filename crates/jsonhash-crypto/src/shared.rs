//! # Shared Bounded Memoizing Hash Function
//!
//! A memoizing hash function whose cache outlives a single batch and may be
//! used from several threads at once. Each handle owns its own copy of the
//! inner hash function; all clones of a handle share one cache behind a
//! `parking_lot::Mutex`.
//!
//! The cache holds at most `capacity` entries and evicts in insertion order
//! (oldest first) once full. Digests are computed outside the lock, so two
//! threads missing on the same input may both compute it; the second insert
//! is a no-op.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;

use jsonhash_core::{Digest, HashError, HashFunction};
use parking_lot::Mutex;
use tracing::trace;

use crate::direct::DirectHash;
use crate::memo::CacheStats;

/// Default capacity for [`SharedMemoizingHash::sha256`].
pub const DEFAULT_CACHE_CAPACITY: usize = 65_536;

#[derive(Debug)]
struct BoundedCache {
    entries: HashMap<String, Digest>,
    order: VecDeque<String>,
    capacity: NonZeroUsize,
    stats: CacheStats,
}

impl BoundedCache {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            stats: CacheStats::default(),
        }
    }

    fn insert(&mut self, key: &str, digest: Digest) {
        if self.entries.contains_key(key) {
            return;
        }
        while self.entries.len() >= self.capacity.get() {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
            trace!(evicted_len = oldest.len(), "evicted cached digest");
        }
        self.order.push_back(key.to_owned());
        self.entries.insert(key.to_owned(), digest);
    }
}

/// Thread-safe, cloneable, capacity-bounded memoizing hash function.
#[derive(Debug)]
pub struct SharedMemoizingHash<H = DirectHash> {
    inner: H,
    cache: Arc<Mutex<BoundedCache>>,
}

impl<H: Clone> Clone for SharedMemoizingHash<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl SharedMemoizingHash<DirectHash> {
    /// Shared memoizing SHA-256 with [`DEFAULT_CACHE_CAPACITY`].
    pub fn sha256() -> Self {
        // DEFAULT_CACHE_CAPACITY is non-zero.
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self::new(DirectHash::sha256(), capacity)
    }
}

impl<H: HashFunction> SharedMemoizingHash<H> {
    /// Memoize `inner` with a cache bounded to `capacity` entries.
    pub fn new(inner: H, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Arc::new(Mutex::new(BoundedCache::new(capacity))),
        }
    }

    /// Number of cached inputs across all handles.
    pub fn len(&self) -> usize {
        self.cache.lock().entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.lock().entries.is_empty()
    }

    /// Maximum number of cached inputs.
    pub fn capacity(&self) -> usize {
        self.cache.lock().capacity.get()
    }

    /// Counters shared by all handles.
    pub fn stats(&self) -> CacheStats {
        self.cache.lock().stats
    }

    /// Drop every cached digest and reset the counters, for all handles.
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.entries.clear();
        cache.order.clear();
        cache.stats = CacheStats::default();
    }
}

impl<H: HashFunction> HashFunction for SharedMemoizingHash<H> {
    fn apply(&mut self, data: &str) -> Result<Digest, HashError> {
        {
            let mut cache = self.cache.lock();
            if let Some(digest) = cache.entries.get(data).cloned() {
                cache.stats.hits += 1;
                return Ok(digest);
            }
        }
        // Failures propagate and are neither cached nor counted.
        let digest = self.inner.apply(data)?;
        let mut cache = self.cache.lock();
        cache.stats.misses += 1;
        cache.insert(data, digest.clone());
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn clones_share_one_cache() {
        let mut a = SharedMemoizingHash::new(DirectHash::sha256(), capacity(8));
        let mut b = a.clone();
        let first = a.apply("x").unwrap();
        let second = b.apply("x").unwrap();
        assert_eq!(first, second);
        assert_eq!(a.len(), 1);
        assert_eq!(b.stats().hits, 1);
        assert_eq!(b.stats().misses, 1);
    }

    #[test]
    fn evicts_oldest_entry_at_capacity() {
        let mut hash = SharedMemoizingHash::new(DirectHash::sha256(), capacity(2));
        hash.apply("a").unwrap();
        hash.apply("b").unwrap();
        hash.apply("c").unwrap();
        assert_eq!(hash.len(), 2);
        assert_eq!(hash.stats().evictions, 1);

        // "a" was evicted and is a miss again; "c" is still cached.
        let misses = hash.stats().misses;
        hash.apply("c").unwrap();
        assert_eq!(hash.stats().misses, misses);
        hash.apply("a").unwrap();
        assert_eq!(hash.stats().misses, misses + 1);
        assert!(hash.len() <= hash.capacity());
    }

    #[test]
    fn matches_direct_hash() {
        let mut direct = DirectHash::sha256();
        let mut shared = SharedMemoizingHash::sha256();
        for input in ["", "k", "k", "[]"] {
            assert_eq!(shared.apply(input).unwrap(), direct.apply(input).unwrap());
        }
        assert_eq!(shared.capacity(), DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn failures_are_not_cached_or_counted() {
        let mut fail_first = true;
        let inner = move |data: &str| -> Result<Digest, HashError> {
            if std::mem::take(&mut fail_first) {
                Err(HashError::Failed("cold start".into()))
            } else {
                Ok(Digest::new(data))
            }
        };
        let mut shared = SharedMemoizingHash::new(inner, capacity(4));
        assert!(shared.apply("k").is_err());
        assert!(shared.is_empty());
        assert_eq!(shared.stats(), CacheStats::default());

        assert_eq!(shared.apply("k").unwrap().as_str(), "k");
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.stats().misses, 1);
    }

    #[test]
    fn stats_match_unbounded_memo_on_failure() {
        let failing = |_: &str| -> Result<Digest, HashError> {
            Err(HashError::Failed("unavailable".into()))
        };
        let mut shared = SharedMemoizingHash::new(failing, capacity(4));
        let mut memo = crate::MemoizingHash::new(failing);
        assert!(shared.apply("a").is_err());
        assert!(memo.apply("a").is_err());
        assert_eq!(shared.stats(), memo.stats());
    }

    #[test]
    fn clear_is_visible_to_every_handle() {
        let mut a = SharedMemoizingHash::sha256();
        let b = a.clone();
        a.apply("x").unwrap();
        b.clear();
        assert!(a.is_empty());
        assert_eq!(a.stats(), CacheStats::default());
    }

    #[test]
    fn concurrent_handles_agree() {
        let shared = SharedMemoizingHash::new(DirectHash::sha256(), capacity(16));
        let expected = DirectHash::sha256().digest("payload");
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let mut hash = shared.clone();
                std::thread::spawn(move || {
                    let mut out = Vec::new();
                    for j in 0..50 {
                        hash.apply(&format!("{}", (i + j) % 20)).unwrap();
                        out.push(hash.apply("payload").unwrap());
                    }
                    out
                })
            })
            .collect();
        for handle in handles {
            for digest in handle.join().unwrap() {
                assert_eq!(digest, expected);
            }
        }
        assert!(shared.len() <= 16);
    }

    #[test]
    fn shared_hash_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedMemoizingHash>();
    }
}
