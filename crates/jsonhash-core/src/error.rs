//! # Error Types
//!
//! Errors raised while decoding documents and reducing them to a digest.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Hash-primitive failures are fatal. They surface immediately and are
//!   never retried: a misconfigured algorithm stays misconfigured.
//! - `calculate` never yields a partial digest. Any error aborts the call.

use thiserror::Error;

/// Top-level error type for jsonhash.
#[derive(Error, Debug)]
pub enum JsonHashError {
    /// The input contains a value kind outside null, scalar, sequence, and
    /// mapping (e.g. a tagged YAML node or a raw byte string).
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Nesting depth exceeded the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded {
        /// The configured maximum depth.
        limit: usize,
    },

    /// The hash primitive failed.
    #[error("hash function error: {0}")]
    Hash(#[from] HashError),

    /// The document could not be decoded into a value tree.
    #[error("decode error: {0}")]
    Decode(String),

    /// The traversal reached an inconsistent state.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error raised by a [`HashFunction`](crate::HashFunction).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The requested digest algorithm is not available.
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The primitive failed while computing a digest.
    #[error("digest computation failed: {0}")]
    Failed(String),
}

impl From<serde_json::Error> for JsonHashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_yaml::Error> for JsonHashError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
