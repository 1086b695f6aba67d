//! Transaction construction.
//!
//! [`Transaction::new`] takes every field at once; [`TransactionBuilder`]
//! assembles the same thing step by step. Neither validates beyond the type
//! system: an empty action list is a legal no-op transaction, and account
//! ids are checked by the node, not here.
//!
//! Building does not sign. That happens in [`super::signing`], so
//! construction stays testable without key material.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::types::{AccountId, Nonce};
use crate::codec::{self, CodecError};
use crate::crypto::hash::CryptoHash;
use crate::crypto::keys::PublicKey;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An unsigned transaction.
///
/// Field order is the Borsh layout and must not change.
///
/// `block_hash` anchors the transaction in time: the network rejects
/// transactions whose reference block is older than its validity window
/// (about a day of blocks on mainnet). Nothing here checks freshness, so
/// fetch a recent hash right before signing.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Transaction {
    /// Account paying for and authorizing the transaction.
    pub signer_id: AccountId,

    /// Access key of `signer_id` that signs it.
    pub public_key: PublicKey,

    /// Must exceed the access key's current nonce.
    pub nonce: Nonce,

    /// Account the actions apply to.
    pub receiver_id: AccountId,

    /// Recent block hash (replay and expiry anchor).
    pub block_hash: CryptoHash,

    /// Executed in order.
    pub actions: Vec<Action>,
}

impl Transaction {
    pub fn new(
        signer_id: impl Into<AccountId>,
        public_key: PublicKey,
        nonce: Nonce,
        receiver_id: impl Into<AccountId>,
        block_hash: CryptoHash,
        actions: Vec<Action>,
    ) -> Self {
        Self {
            signer_id: signer_id.into(),
            public_key,
            nonce,
            receiver_id: receiver_id.into(),
            block_hash,
            actions,
        }
    }

    /// Canonical bytes, the input to the transaction hash.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode(self)
    }

    /// SHA-256 of the canonical bytes. This is both the value that gets
    /// signed and the transaction id the network reports.
    pub fn hash(&self) -> Result<CryptoHash, CodecError> {
        Ok(CryptoHash::of(&self.to_bytes()?))
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`].
///
/// The signer, key and block hash are required up front; receiver defaults
/// to the signer and nonce to zero.
///
/// ```
/// use txkit::crypto::{CryptoHash, PrivateKey};
/// use txkit::transaction::{Action, TransactionBuilder};
/// use txkit::transaction::types::Balance;
///
/// let key = PrivateKey::generate();
/// let tx = TransactionBuilder::new("alice.testnet", key.public_key(), CryptoHash::default())
///     .receiver("bob.testnet")
///     .nonce(7)
///     .action(Action::transfer(Balance::from_tokens(1)))
///     .build();
/// assert_eq!(tx.actions.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    signer_id: AccountId,
    public_key: PublicKey,
    nonce: Nonce,
    receiver_id: Option<AccountId>,
    block_hash: CryptoHash,
    actions: Vec<Action>,
}

impl TransactionBuilder {
    pub fn new(signer_id: impl Into<AccountId>, public_key: PublicKey, block_hash: CryptoHash) -> Self {
        Self {
            signer_id: signer_id.into(),
            public_key,
            nonce: 0,
            receiver_id: None,
            block_hash,
            actions: Vec::new(),
        }
    }

    pub fn receiver(mut self, receiver_id: impl Into<AccountId>) -> Self {
        self.receiver_id = Some(receiver_id.into());
        self
    }

    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn block_hash(mut self, block_hash: CryptoHash) -> Self {
        self.block_hash = block_hash;
        self
    }

    /// Appends one action.
    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Appends several actions, preserving their order.
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn build(self) -> Transaction {
        let receiver_id = self
            .receiver_id
            .unwrap_or_else(|| self.signer_id.clone());
        Transaction {
            signer_id: self.signer_id,
            public_key: self.public_key,
            nonce: self.nonce,
            receiver_id,
            block_hash: self.block_hash,
            actions: self.actions,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
