//! # Canonicalizer — Order-Insensitive Structural Digest
//!
//! Reduces a [`JsonValue`] tree to one [`Digest`] such that reordering a
//! sequence's elements or a mapping's pairs never changes the result.
//!
//! ## Combination Rules
//!
//! 1. `Null` → `hash("")`.
//! 2. `Scalar(text)` → `hash(text)`.
//! 3. `Sequence(items)` → digest every item, sort the digests byte-wise,
//!    concatenate them, and hash the concatenation.
//! 4. `Mapping(pairs)` → for each pair, `hash(digest(key) ++ digest(value))`;
//!    sort the pair digests, concatenate, hash.
//!
//! Duplicate mapping keys are not merged: each occurrence adds its own pair
//! digest. `Null`, `[]`, and `{}` all reduce to `hash("")`.
//!
//! ## Traversal
//!
//! The walk is post-order over an explicit heap stack, so nesting depth never
//! grows the call stack. [`HashOptions::max_depth`] additionally rejects
//! documents nested deeper than a configured limit. Memory per combination
//! step is bounded by the fan-out of the node being combined.
//!
//! A call either returns the complete digest or fails as a whole.

use tracing::debug;

use crate::digest::Digest;
use crate::error::JsonHashError;
use crate::hash::HashFunction;
use crate::value::JsonValue;

/// Default nesting limit applied by [`HashOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// Tuning for a canonicalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    /// Deepest nesting level accepted; the root sits at depth 0. `None`
    /// disables the check.
    pub max_depth: Option<usize>,
}

impl HashOptions {
    /// Options with no depth limit.
    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }

    /// Options with the given depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

impl Default for HashOptions {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }
}

/// Pending work on the traversal stack.
enum Frame<'a> {
    Visit { value: &'a JsonValue, depth: usize },
    /// Fold the top `count` digests into one collection digest.
    Combine { count: usize },
    /// Fold the top two digests (key, value) into one pair digest.
    Pair,
}

/// Compute the digest of `value` with the default [`HashOptions`].
pub fn calculate<H>(value: &JsonValue, hash: &mut H) -> Result<Digest, JsonHashError>
where
    H: HashFunction + ?Sized,
{
    calculate_with(value, hash, HashOptions::default())
}

/// Compute the digest of `value` under explicit options.
pub fn calculate_with<H>(
    value: &JsonValue,
    hash: &mut H,
    options: HashOptions,
) -> Result<Digest, JsonHashError>
where
    H: HashFunction + ?Sized,
{
    let mut frames = vec![Frame::Visit { value, depth: 0 }];
    let mut digests: Vec<Digest> = Vec::new();
    let mut invocations: usize = 0;

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Visit { value, depth } => {
                if let Some(limit) = options.max_depth {
                    if depth > limit {
                        return Err(JsonHashError::DepthLimitExceeded { limit });
                    }
                }
                match value {
                    JsonValue::Null => {
                        invocations += 1;
                        digests.push(hash.apply("")?);
                    }
                    JsonValue::Scalar(text) => {
                        invocations += 1;
                        digests.push(hash.apply(text)?);
                    }
                    JsonValue::Sequence(items) => {
                        frames.push(Frame::Combine { count: items.len() });
                        for item in items.iter().rev() {
                            frames.push(Frame::Visit {
                                value: item,
                                depth: depth + 1,
                            });
                        }
                    }
                    JsonValue::Mapping(pairs) => {
                        frames.push(Frame::Combine { count: pairs.len() });
                        for (key, value) in pairs.iter().rev() {
                            // Popped in order: key, value, then the pair fold.
                            frames.push(Frame::Pair);
                            frames.push(Frame::Visit {
                                value,
                                depth: depth + 1,
                            });
                            frames.push(Frame::Visit {
                                value: key,
                                depth: depth + 1,
                            });
                        }
                    }
                }
            }
            Frame::Pair => {
                let value_digest = pop_digest(&mut digests)?;
                let key_digest = pop_digest(&mut digests)?;
                let mut joined =
                    String::with_capacity(key_digest.len() + value_digest.len());
                joined.push_str(key_digest.as_str());
                joined.push_str(value_digest.as_str());
                invocations += 1;
                digests.push(hash.apply(&joined)?);
            }
            Frame::Combine { count } => {
                let start = digests.len().checked_sub(count).ok_or_else(|| {
                    JsonHashError::Internal("traversal stack underflow".to_string())
                })?;
                let mut children = digests.split_off(start);
                children.sort_unstable();
                let joined = children
                    .iter()
                    .fold(String::with_capacity(count * 64), |mut acc, d| {
                        acc.push_str(d.as_str());
                        acc
                    });
                invocations += 1;
                digests.push(hash.apply(&joined)?);
            }
        }
    }

    let digest = pop_digest(&mut digests)?;
    debug!(kind = value.kind(), invocations, "calculated digest");
    Ok(digest)
}

fn pop_digest(digests: &mut Vec<Digest>) -> Result<Digest, JsonHashError> {
    digests
        .pop()
        .ok_or_else(|| JsonHashError::Internal("traversal stack underflow".to_string()))
}

/// A canonicalizer bound to one hash function instance.
///
/// The instance is reused across calls, so a memoizing function keeps its
/// cache for the lifetime of this value. Construct one per batch of related
/// documents and drop it afterwards.
#[derive(Debug, Clone)]
pub struct JsonHash<H> {
    hash: H,
    options: HashOptions,
}

impl<H: HashFunction> JsonHash<H> {
    /// Canonicalizer with default options.
    pub fn new(hash: H) -> Self {
        Self::with_options(hash, HashOptions::default())
    }

    /// Canonicalizer with explicit options.
    pub fn with_options(hash: H, options: HashOptions) -> Self {
        Self { hash, options }
    }

    /// The options in effect.
    pub fn options(&self) -> HashOptions {
        self.options
    }

    /// Digest of one document.
    pub fn calculate(&mut self, value: &JsonValue) -> Result<Digest, JsonHashError> {
        calculate_with(value, &mut self.hash, self.options)
    }

    /// Digests of several documents, in input order. Stops at the first error.
    pub fn calculate_all<'a, I>(&mut self, values: I) -> Result<Vec<Digest>, JsonHashError>
    where
        I: IntoIterator<Item = &'a JsonValue>,
    {
        values
            .into_iter()
            .map(|value| self.calculate(value))
            .collect()
    }

    /// Borrow the hash function.
    pub fn hash_function(&self) -> &H {
        &self.hash
    }

    /// Mutably borrow the hash function.
    pub fn hash_function_mut(&mut self) -> &mut H {
        &mut self.hash
    }

    /// Release the hash function.
    pub fn into_inner(self) -> H {
        self.hash
    }
}
