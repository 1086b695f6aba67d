//! Transaction signing.
//!
//! The signature covers the SHA-256 digest of the transaction's canonical
//! bytes, not the bytes themselves. The same digest is the transaction id,
//! so the signer hands it back for logging and retry correlation.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::builder::Transaction;
use crate::codec::{self, CodecError};
use crate::crypto::hash::CryptoHash;
use crate::crypto::keys::{PrivateKey, PublicKey, Signature};

/// Errors from [`sign_transaction`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    #[error("failed to encode transaction: {0}")]
    Codec(#[from] CodecError),

    /// The private key does not belong to the transaction's public key; the
    /// network would reject the signature.
    #[error("signing key {actual} does not match transaction key {expected}")]
    KeyMismatch {
        expected: PublicKey,
        actual: PublicKey,
    },
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A transaction plus the signature over its hash.
///
/// Immutable once produced. Borsh layout is the transaction followed by the
/// tagged signature; this is the payload the broadcast RPC expects.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

impl SignedTransaction {
    /// Recomputes the transaction id.
    pub fn hash(&self) -> Result<CryptoHash, CodecError> {
        self.transaction.hash()
    }

    /// Checks the signature against the embedded public key. Any failure,
    /// including an encode failure, is a plain `false`.
    pub fn verify(&self) -> bool {
        match self.hash() {
            Ok(hash) => self
                .transaction
                .public_key
                .verify(hash.as_bytes(), &self.signature),
            Err(_) => false,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(self)
    }

    /// Base64 of the canonical bytes, ready for `broadcast_tx_commit`.
    pub fn to_base64(&self) -> Result<String, CodecError> {
        codec::encode_base64(self)
    }

    pub fn from_base64(text: &str) -> Result<Self, CodecError> {
        codec::decode_base64(text)
    }
}

/// Hashes and signs `transaction` with `private_key`.
///
/// Returns the transaction id alongside the signed envelope. Fails if the
/// transaction cannot be encoded or the key is not the one named in
/// `transaction.public_key`.
///
/// # Example
///
/// ```
/// use txkit::crypto::{CryptoHash, PrivateKey};
/// use txkit::transaction::{sign_transaction, Action, Transaction};
/// use txkit::transaction::types::Balance;
///
/// let key = PrivateKey::generate();
/// let tx = Transaction::new(
///     "alice.testnet",
///     key.public_key(),
///     1,
///     "bob.testnet",
///     CryptoHash::default(),
///     vec![Action::transfer(Balance::from_yocto(1000))],
/// );
/// let (hash, signed) = sign_transaction(tx, &key).unwrap();
/// assert_eq!(signed.hash().unwrap(), hash);
/// assert!(signed.verify());
/// ```
pub fn sign_transaction(
    transaction: Transaction,
    private_key: &PrivateKey,
) -> Result<(CryptoHash, SignedTransaction), SigningError> {
    let actual = private_key.public_key();
    if actual != transaction.public_key {
        return Err(SigningError::KeyMismatch {
            expected: transaction.public_key,
            actual,
        });
    }

    let hash = transaction.hash()?;
    let signature = private_key.sign(hash.as_bytes());
    Ok((
        hash,
        SignedTransaction {
            transaction,
            signature,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
