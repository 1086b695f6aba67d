//! # Transaction Module
//!
//! Construction and signing of network transactions.
//!
//! ```text
//! types.rs   — Balance and the id/gas/nonce aliases
//! action.rs  — the closed Action union and access keys
//! builder.rs — Transaction and TransactionBuilder
//! signing.rs — sign_transaction and SignedTransaction
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** a [`Transaction`] with a fresh nonce and a recent block hash.
//! 2. **Sign** it with [`sign_transaction`], which returns the transaction
//!    id (SHA-256 of the canonical bytes) and a [`SignedTransaction`].
//! 3. **Broadcast** the signed envelope through [`crate::rpc::Broadcaster`].
//!
//! A transaction is rebuilt for every send attempt, since a nonce conflict
//! means the old one can never succeed.

pub mod action;
pub mod builder;
pub mod signing;
pub mod types;

pub use action::{AccessKey, AccessKeyPermission, Action, FunctionCallAction};
pub use builder::{Transaction, TransactionBuilder};
pub use signing::{sign_transaction, SignedTransaction, SigningError};
pub use types::{AccountId, Balance, Gas, Nonce};
