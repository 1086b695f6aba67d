// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txkit — Transaction Toolkit
//!
//! Client-side plumbing for submitting transactions to a NEAR-style
//! account-based network: typed keys, the canonical Borsh wire format,
//! signing, and a broadcast loop that survives nonce races.
//!
//! ## Architecture
//!
//! - **config** — protocol constants and default retry parameters.
//! - **crypto** — algorithm-tagged keys and signatures, SHA-256 hashes.
//! - **codec** — deterministic Borsh encode/decode with typed errors.
//! - **transaction** — actions, transactions, and the signer.
//! - **rpc** — JSON-RPC boundary, outcome decoding, broadcast with retry.
//!
//! ## Quick start
//!
//! ```
//! use txkit::crypto::{CryptoHash, PrivateKey};
//! use txkit::transaction::{sign_transaction, Action, Balance, Transaction};
//!
//! let key = PrivateKey::generate();
//! let tx = Transaction::new(
//!     "alice.testnet",
//!     key.public_key(),
//!     1,
//!     "bob.testnet",
//!     CryptoHash::default(),
//!     vec![Action::transfer(Balance::from_tokens(1))],
//! );
//! let (tx_hash, signed) = sign_transaction(tx, &key).unwrap();
//! let wire = signed.to_base64().unwrap();
//! assert!(!wire.is_empty());
//! println!("{tx_hash}");
//! ```
//!
//! The codec and signer are pure and safe to call from any thread. The
//! broadcaster is sequential per transaction; serialize submissions per
//! signing key.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod rpc;
pub mod transaction;
