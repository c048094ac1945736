//! # Direct SHA-2 Digests
//!
//! The stateless hash primitive: every call runs the digest algorithm over
//! the UTF-8 bytes of its input and renders the result as lowercase hex.
//!
//! The algorithm is chosen at construction through [`DigestAlgorithm`], so a
//! misconfigured name fails once, up front, and is never retried.

use std::str::FromStr;

use jsonhash_core::{Digest, HashError, HashFunction};
use sha2::{Digest as _, Sha256, Sha512};

/// The digest algorithm behind a [`DirectHash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    /// SHA-256: 64 hex characters per digest.
    #[default]
    Sha256,
    /// SHA-512: 128 hex characters per digest.
    Sha512,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of a rendered digest, in hex characters.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(HashError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Stateless SHA-2 hash function. Cheap to copy and safe to share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectHash {
    algorithm: DigestAlgorithm,
}

impl DirectHash {
    /// A direct hash function for `algorithm`.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    /// SHA-256, the default.
    pub fn sha256() -> Self {
        Self::new(DigestAlgorithm::Sha256)
    }

    /// The algorithm in use.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Hash without going through the trait; never fails.
    pub fn digest(&self, data: &str) -> Digest {
        match self.algorithm {
            DigestAlgorithm::Sha256 => Digest::from_bytes(&Sha256::digest(data.as_bytes())),
            DigestAlgorithm::Sha512 => Digest::from_bytes(&Sha512::digest(data.as_bytes())),
        }
    }
}

impl HashFunction for DirectHash {
    fn apply(&mut self, data: &str) -> Result<Digest, HashError> {
        Ok(self.digest(data))
    }
}

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &str) -> String {
    DirectHash::sha256().digest(data).into_string()
}
