//! # Batch Hasher
//!
//! One invocation of the CLI is one batch. When memoization is enabled, a
//! single cache serves every document of the batch and is dropped when the
//! command finishes: a `MemoizingHash` by default, or a `SharedMemoizingHash`
//! when a cache capacity bounds it.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use jsonhash_core::{Digest, DocumentFormat, JsonHash, JsonValue};
use jsonhash_crypto::{CacheStats, DirectHash, MemoizingHash, SharedMemoizingHash};

use crate::config::HashSettings;

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// The canonicalizer for one CLI invocation.
#[derive(Debug)]
pub enum BatchHasher {
    /// No cache.
    Direct(JsonHash<DirectHash>),
    /// One cache for the whole batch.
    Memoizing(JsonHash<MemoizingHash<DirectHash>>),
    /// One capacity-bounded cache for the whole batch.
    Bounded(JsonHash<SharedMemoizingHash<DirectHash>>),
}

impl BatchHasher {
    /// Build the canonicalizer described by `settings`.
    pub fn new(settings: &HashSettings) -> Self {
        let direct = DirectHash::new(settings.algorithm);
        match (settings.memoize, settings.cache_capacity) {
            (false, _) => Self::Direct(JsonHash::with_options(direct, settings.options)),
            (true, None) => Self::Memoizing(JsonHash::with_options(
                MemoizingHash::new(direct),
                settings.options,
            )),
            (true, Some(capacity)) => Self::Bounded(JsonHash::with_options(
                SharedMemoizingHash::new(direct, capacity),
                settings.options,
            )),
        }
    }

    /// Digest of one document.
    pub fn calculate(&mut self, value: &JsonValue) -> Result<Digest> {
        let digest = match self {
            Self::Direct(hasher) => hasher.calculate(value)?,
            Self::Memoizing(hasher) => hasher.calculate(value)?,
            Self::Bounded(hasher) => hasher.calculate(value)?,
        };
        Ok(digest)
    }

    /// Log cache counters at debug level, if there is a cache.
    pub fn log_stats(&self) {
        if let Some((entries, stats)) = self.cache_stats() {
            tracing::debug!(
                entries,
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                hit_ratio = stats.hit_ratio(),
                "memoization cache statistics"
            );
        }
    }

    /// Cached entry count and counters, if there is a cache.
    pub fn cache_stats(&self) -> Option<(usize, CacheStats)> {
        match self {
            Self::Direct(_) => None,
            Self::Memoizing(hasher) => {
                let memo = hasher.hash_function();
                Some((memo.len(), memo.stats()))
            }
            Self::Bounded(hasher) => {
                let memo = hasher.hash_function();
                Some((memo.len(), memo.stats()))
            }
        }
    }
}

/// Read and decode the document at `path` (`-` for stdin).
///
/// `format` overrides extension-based detection; stdin defaults to JSON.
pub fn read_document(path: &Path, format: Option<DocumentFormat>) -> Result<JsonValue> {
    let bytes = if path.as_os_str() == STDIN_PATH {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read standard input")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?
    };

    let format = format.unwrap_or_else(|| DocumentFormat::from_path(path));
    tracing::trace!(path = %path.display(), %format, bytes = bytes.len(), "decoding document");
    format
        .decode(&bytes)
        .with_context(|| format!("failed to decode {format} document: {}", path.display()))
}
