//! # Broadcast with Nonce Retry
//!
//! [`Broadcaster`] submits signed transactions through `broadcast_tx_commit`
//! and retries only one failure class: the node rejecting the nonce. Any
//! other remote error, transport failure, or cancellation ends the call
//! immediately.
//!
//! Each attempt asks a [`TransactionFactory`] for the transaction to send.
//! A stale nonce fails the same way every time, so factories that can
//! re-read the access key (see [`super::access_key::AccessKeyFactory`])
//! rebuild and re-sign on every attempt.
//!
//! ## Timing
//!
//! After failed attempt `k` (1-based) the broadcaster sleeps
//! `initial_wait × backoff^(k-1)`: 500 ms, 750 ms, 1125 ms, ... with the
//! defaults. There is no sleep after the last attempt.
//!
//! ## Concurrency
//!
//! Submissions for the same signing key must be serialized by the caller.
//! Two concurrent submissions will race for the same nonce and one of them
//! pays for it with retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::outcome::{
    FinalExecutionOutcome, FinalExecutionStatus, FinalExecutionStatusBasic, OutcomeError, Status,
};
use super::transport::{RpcTransport, TransportError};
use crate::codec::CodecError;
use crate::config::{
    BROADCAST_TX_COMMIT, NONCE_RETRY_ATTEMPTS, NONCE_RETRY_BACKOFF, NONCE_RETRY_INITIAL_WAIT,
    NONCE_RETRY_MAX_WAIT,
};
use crate::crypto::hash::CryptoHash;
use crate::transaction::signing::{SignedTransaction, SigningError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BroadcastError {
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),

    #[error("encoding failed: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Every attempt hit a nonce conflict.
    #[error("failed to finish after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// The node answered with neither a result nor an error.
    #[error("node returned an empty result without an error")]
    EmptyResult,

    /// The result did not look like a final execution outcome.
    #[error("unexpected broadcast result: {0}")]
    MalformedOutcome(String),

    /// A lookup needed to build the transaction returned something unusable.
    #[error("query failed: {0}")]
    Query(String),

    #[error("transaction {tx_id} failed with message < {message} > and type < {error_type} >")]
    TransactionFailed {
        tx_id: CryptoHash,
        message: String,
        error_type: String,
    },

    /// Failure status without the `error_message`/`error_type` pair; the
    /// payload is the status rendered as JSON.
    #[error("status failure: {payload}")]
    FailureStatus { payload: String },

    #[error(transparent)]
    Outcome(#[from] OutcomeError),
}

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// Rejected retry settings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RetryPolicyError {
    #[error("max_attempts must be at least 1")]
    NoAttempts,

    #[error("backoff must be a finite factor of at least 1.0, got {0}")]
    InvalidBackoff(f64),
}

/// How many times to submit and how long to wait between nonce conflicts.
///
/// Serializable so it can sit in a caller's config file. Values are
/// validated on the way in, and no single wait exceeds
/// [`NONCE_RETRY_MAX_WAIT`]:
///
/// ```
/// use txkit::rpc::RetryPolicy;
///
/// let policy: RetryPolicy =
///     serde_json::from_str(r#"{"max_attempts": 3, "initial_wait_ms": 100, "backoff": 2.0}"#).unwrap();
/// assert_eq!(policy.wait_after(2).as_millis(), 200);
///
/// assert!(serde_json::from_str::<RetryPolicy>(
///     r#"{"max_attempts": 3, "initial_wait_ms": 100, "backoff": -2.0}"#
/// )
/// .is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RetryPolicyConfig")]
pub struct RetryPolicy {
    max_attempts: u32,
    #[serde(rename = "initial_wait_ms", with = "duration_ms")]
    initial_wait: Duration,
    backoff: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: NONCE_RETRY_ATTEMPTS,
            initial_wait: NONCE_RETRY_INITIAL_WAIT,
            backoff: NONCE_RETRY_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        initial_wait: Duration,
        backoff: f64,
    ) -> Result<Self, RetryPolicyError> {
        if max_attempts == 0 {
            return Err(RetryPolicyError::NoAttempts);
        }
        if !backoff.is_finite() || backoff < 1.0 {
            return Err(RetryPolicyError::InvalidBackoff(backoff));
        }
        Ok(Self {
            max_attempts,
            initial_wait,
            backoff,
        })
    }

    /// Same waits, different attempt ceiling.
    pub fn with_max_attempts(self, max_attempts: u32) -> Result<Self, RetryPolicyError> {
        Self::new(max_attempts, self.initial_wait, self.backoff)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_wait(&self) -> Duration {
        self.initial_wait
    }

    pub fn backoff(&self) -> f64 {
        self.backoff
    }

    /// Sleep after failed attempt `attempt` (1-based), capped at
    /// [`NONCE_RETRY_MAX_WAIT`].
    pub fn wait_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_wait.as_secs_f64() * self.backoff.powi(exponent);
        Duration::try_from_secs_f64(secs)
            .map(|wait| wait.min(NONCE_RETRY_MAX_WAIT))
            .unwrap_or(NONCE_RETRY_MAX_WAIT)
    }
}

/// Unvalidated shape of [`RetryPolicy`] as it appears in config files.
#[derive(Deserialize)]
struct RetryPolicyConfig {
    max_attempts: u32,
    #[serde(rename = "initial_wait_ms", with = "duration_ms")]
    initial_wait: Duration,
    backoff: f64,
}

impl TryFrom<RetryPolicyConfig> for RetryPolicy {
    type Error = RetryPolicyError;

    fn try_from(raw: RetryPolicyConfig) -> Result<Self, Self::Error> {
        Self::new(raw.max_attempts, raw.initial_wait, raw.backoff)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ---------------------------------------------------------------------------
// Transaction factories
// ---------------------------------------------------------------------------

/// A signed transaction together with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    pub hash: CryptoHash,
    pub signed: SignedTransaction,
}

impl PreparedTransaction {
    pub fn new(signed: SignedTransaction) -> Result<Self, CodecError> {
        Ok(Self {
            hash: signed.hash()?,
            signed,
        })
    }
}

/// Produces the transaction for each attempt.
#[async_trait]
pub trait TransactionFactory: Send {
    /// Called once per attempt, starting at 1.
    async fn prepare(&mut self, attempt: u32) -> Result<PreparedTransaction, BroadcastError>;
}

/// A fixed transaction resubmitted as-is. Only useful when the caller
/// already knows the nonce is fresh.
#[async_trait]
impl TransactionFactory for PreparedTransaction {
    async fn prepare(&mut self, _attempt: u32) -> Result<PreparedTransaction, BroadcastError> {
        Ok(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Broadcaster
// ---------------------------------------------------------------------------

enum Attempt {
    Success(FinalExecutionOutcome),
    NonceConflict,
    Fatal(BroadcastError),
}

pub struct Broadcaster<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: RpcTransport> Broadcaster<T> {
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, RetryPolicy::default())
    }

    pub fn with_policy(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits an already signed transaction. Nonce conflicts are retried
    /// with the same bytes, which only helps if the conflict was transient.
    pub async fn submit(
        &self,
        signed: SignedTransaction,
    ) -> Result<FinalExecutionOutcome, BroadcastError> {
        let mut prepared = PreparedTransaction::new(signed)?;
        self.submit_with(&mut prepared).await
    }

    /// Submits the transactions `factory` produces until one is accepted,
    /// a non-retryable error occurs, or the attempts run out.
    ///
    /// An accepted transaction whose final status is a failure is returned
    /// as [`BroadcastError::TransactionFailed`] or
    /// [`BroadcastError::FailureStatus`].
    pub async fn submit_with<F>(&self, factory: &mut F) -> Result<FinalExecutionOutcome, BroadcastError>
    where
        F: TransactionFactory + ?Sized,
    {
        let max_attempts = self.policy.max_attempts();
        for attempt in 1..=max_attempts {
            let prepared = factory.prepare(attempt).await?;
            if attempt == 1 {
                info!(
                    tx_hash = %prepared.hash,
                    signer = %prepared.signed.transaction.signer_id,
                    receiver = %prepared.signed.transaction.receiver_id,
                    "submitting transaction"
                );
            } else {
                debug!(
                    tx_hash = %prepared.hash,
                    nonce = prepared.signed.transaction.nonce,
                    attempt,
                    "resubmitting rebuilt transaction"
                );
            }

            match self.attempt(&prepared).await {
                Attempt::Success(outcome) => return check_status(outcome),
                Attempt::Fatal(err) => return Err(err),
                Attempt::NonceConflict if attempt < max_attempts => {
                    let wait = self.policy.wait_after(attempt);
                    warn!(
                        tx_hash = %prepared.hash,
                        attempt,
                        next_wait_ms = wait.as_millis() as u64,
                        "nonce conflict, retrying with a new nonce"
                    );
                    tokio::time::sleep(wait).await;
                }
                Attempt::NonceConflict => {
                    warn!(tx_hash = %prepared.hash, attempt, "nonce conflict on final attempt");
                }
            }
        }
        Err(BroadcastError::RetriesExhausted {
            attempts: max_attempts,
        })
    }

    async fn attempt(&self, prepared: &PreparedTransaction) -> Attempt {
        let encoded = match prepared.signed.to_base64() {
            Ok(encoded) => encoded,
            Err(e) => return Attempt::Fatal(e.into()),
        };
        match self.transport.call(BROADCAST_TX_COMMIT, json!([encoded])).await {
            Ok(Value::Null) => Attempt::Fatal(BroadcastError::EmptyResult),
            Ok(result) => match serde_json::from_value::<FinalExecutionOutcome>(result) {
                Ok(outcome) => Attempt::Success(outcome),
                Err(e) => Attempt::Fatal(BroadcastError::MalformedOutcome(e.to_string())),
            },
            Err(e) if e.is_invalid_nonce() => Attempt::NonceConflict,
            Err(e) => Attempt::Fatal(e.into()),
        }
    }
}

/// Turns an accepted-but-failed transaction into an error.
fn check_status(outcome: FinalExecutionOutcome) -> Result<FinalExecutionOutcome, BroadcastError> {
    match outcome.status()? {
        Status::Basic(FinalExecutionStatusBasic::Failure) => Err(BroadcastError::FailureStatus {
            payload: "Failure".to_string(),
        }),
        Status::Structured(FinalExecutionStatus::Failure(failure)) => {
            Err(failure_error(outcome.transaction_outcome.id, failure))
        }
        _ => Ok(outcome),
    }
}

fn failure_error(tx_id: CryptoHash, failure: Map<String, Value>) -> BroadcastError {
    debug!(tx_hash = %tx_id, failure = ?failure, "transaction failed");
    match (failure.get("error_message"), failure.get("error_type")) {
        (Some(message), Some(error_type)) => BroadcastError::TransactionFailed {
            tx_id,
            message: value_text(message),
            error_type: value_text(error_type),
        },
        _ => BroadcastError::FailureStatus {
            payload: format!("{:#}", Value::Object(failure)),
        },
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
