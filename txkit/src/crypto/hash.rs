//! # Hashing Utilities
//!
//! SHA-256 is the only digest the network uses on the client side: block
//! hashes and transaction identifiers are both 32-byte SHA-256 outputs,
//! rendered as base58 in JSON and in logs.

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::HASH_LENGTH;

/// Errors from parsing a base58 hash.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("invalid base58 hash: {0}")]
    InvalidBase58(String),

    #[error("hash must be {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Compute the SHA-256 digest of `data` as a fixed-size array.
///
/// # Example
///
/// ```
/// use txkit::crypto::sha256;
///
/// let digest = sha256(b"txkit");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; HASH_LENGTH];
    output.copy_from_slice(&result);
    output
}

/// A 32-byte SHA-256 digest.
///
/// Used for the reference block hash inside a transaction (the replay and
/// expiry anchor) and for the transaction identifier the signer returns.
/// Borsh-encoded as 32 raw bytes with no length prefix; text form is base58.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, BorshSerialize, BorshDeserialize,
)]
pub struct CryptoHash(pub [u8; HASH_LENGTH]);

impl CryptoHash {
    /// Hashes `data` with SHA-256.
    pub fn of(data: &[u8]) -> Self {
        Self(sha256(data))
    }

    /// Borrows the raw digest.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Base58 text form.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    /// Hex form, handy when comparing against other tooling.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; HASH_LENGTH]> for CryptoHash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for CryptoHash {
    type Err = HashError;

    /// Parses a base58 digest. Anything but exactly 32 decoded bytes fails.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| HashError::InvalidBase58(e.to_string()))?;
        let arr: [u8; HASH_LENGTH] =
            bytes.as_slice().try_into().map_err(|_| HashError::WrongLength {
                expected: HASH_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoHash({})", self.to_base58())
    }
}

impl Serialize for CryptoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CryptoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
