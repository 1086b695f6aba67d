//! # RPC Layer
//!
//! Everything that talks to a node:
//!
//! - **transport** — JSON-RPC envelope types and the [`RpcTransport`] trait.
//! - **outcome** — the execution outcome documents and the status classifier.
//! - **broadcast** — [`Broadcaster`], the commit-style submit loop with
//!   nonce-conflict retry.
//! - **access_key** — [`AccessKeyFactory`], which rebuilds and re-signs a
//!   transaction with a fresh nonce for every attempt.

pub mod access_key;
pub mod broadcast;
pub mod outcome;
pub mod transport;

pub use access_key::{AccessKeyFactory, AccessKeyView};
pub use broadcast::{
    BroadcastError, Broadcaster, PreparedTransaction, RetryPolicy, RetryPolicyError,
    TransactionFactory,
};
pub use outcome::{
    classify, classify_str, ExecutionOutcome, ExecutionOutcomeWithId, ExecutionStatus,
    ExecutionStatusBasic, FinalExecutionOutcome, FinalExecutionStatus, FinalExecutionStatusBasic,
    FinalStatus, OutcomeError, ReceiptStatus, Status,
};
pub use transport::{RpcError, RpcRequest, RpcResponse, RpcTransport, TransportError};
