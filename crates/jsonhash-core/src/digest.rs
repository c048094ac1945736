//! # Digest — Opaque Hex Fingerprint
//!
//! Defines `Digest`, the value produced by every hash invocation and by the
//! canonicalizer itself.
//!
//! A digest is treated as an opaque string: the canonicalizer concatenates
//! child digests textually and sorts them byte-wise, so equality and ordering
//! are plain string equality and ordering. Real primitives produce lowercase
//! hex (64 characters for a 256-bit algorithm); test doubles may produce any
//! text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The output of a hash function.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap an already-rendered digest string.
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Render raw digest bytes as lowercase hex.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// The digest text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the rendered digest.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the rendered digest is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the digest is non-empty lowercase hex.
    pub fn is_lower_hex(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    /// Consume the digest, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Digest {
    fn from(hex: String) -> Self {
        Self(hex)
    }
}

impl From<&str> for Digest {
    fn from(hex: &str) -> Self {
        Self(hex.to_owned())
    }
}
