//! # Execution Outcomes
//!
//! The node reports execution status in two shapes under the same key:
//! a bare string tag (`"Started"`, `"Pending"`, `"Failure"`, ...) or an
//! object (`{"SuccessValue": "<base64>"}`, `{"Failure": {...}}`). Decoding
//! is done in two steps: look at the generic JSON value first, then decode
//! the object form into a typed enum. A string is never fed to the
//! structured decoder and an object is never matched against tags.
//!
//! Unknown string tags come back as [`Status::Unrecognized`] because newer
//! nodes may add tags. A malformed object is an error.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::crypto::hash::CryptoHash;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    #[error("status is not valid JSON: {0}")]
    InvalidJson(String),

    /// Neither a string nor an object, e.g. a number or `null`.
    #[error("status has unexpected JSON shape: {0}")]
    UnexpectedShape(&'static str),

    #[error("malformed structured status: {0}")]
    Malformed(String),

    #[error("success value is not valid base64: {0}")]
    SuccessValue(String),
}

// ---------------------------------------------------------------------------
// Status tags and structured forms
// ---------------------------------------------------------------------------

/// A closed set of bare string status tags.
pub trait BasicStatus: Sized {
    fn from_tag(tag: &str) -> Option<Self>;
}

/// String tags for a whole transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalExecutionStatusBasic {
    NotStarted,
    Started,
    Failure,
}

impl BasicStatus for FinalExecutionStatusBasic {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "NotStarted" => Some(Self::NotStarted),
            "Started" => Some(Self::Started),
            "Failure" => Some(Self::Failure),
            _ => None,
        }
    }
}

/// String tags for a single receipt or the transaction's own outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatusBasic {
    Unknown,
    Pending,
    Failure,
}

impl BasicStatus for ExecutionStatusBasic {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Unknown" => Some(Self::Unknown),
            "Pending" => Some(Self::Pending),
            "Failure" => Some(Self::Failure),
            _ => None,
        }
    }
}

/// Object form of a transaction's final status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FinalExecutionStatus {
    /// Base64 of the last receipt's return value.
    SuccessValue(String),
    Failure(Map<String, Value>),
}

/// Object form of a receipt's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    SuccessValue(String),
    /// Execution continues in another receipt.
    SuccessReceiptId(String),
    Failure(Map<String, Value>),
}

/// Result of [`classify`]: exactly one of a known tag, an unknown tag, or a
/// structured status.
#[derive(Debug, Clone, PartialEq)]
pub enum Status<B, S> {
    Basic(B),
    Unrecognized(String),
    Structured(S),
}

pub type FinalStatus = Status<FinalExecutionStatusBasic, FinalExecutionStatus>;
pub type ReceiptStatus = Status<ExecutionStatusBasic, ExecutionStatus>;

/// Classifies an already-parsed status value.
pub fn classify<B, S>(raw: &Value) -> Result<Status<B, S>, OutcomeError>
where
    B: BasicStatus,
    S: DeserializeOwned,
{
    match raw {
        Value::String(tag) => Ok(B::from_tag(tag)
            .map(Status::Basic)
            .unwrap_or_else(|| Status::Unrecognized(tag.clone()))),
        Value::Object(_) => S::deserialize(raw)
            .map(Status::Structured)
            .map_err(|e| OutcomeError::Malformed(e.to_string())),
        Value::Null => Err(OutcomeError::UnexpectedShape("null")),
        Value::Bool(_) => Err(OutcomeError::UnexpectedShape("bool")),
        Value::Number(_) => Err(OutcomeError::UnexpectedShape("number")),
        Value::Array(_) => Err(OutcomeError::UnexpectedShape("array")),
    }
}

/// Parses raw JSON text, then classifies it.
pub fn classify_str<B, S>(raw: &str) -> Result<Status<B, S>, OutcomeError>
where
    B: BasicStatus,
    S: DeserializeOwned,
{
    let value: Value =
        serde_json::from_str(raw).map_err(|e| OutcomeError::InvalidJson(e.to_string()))?;
    classify(&value)
}

// ---------------------------------------------------------------------------
// Outcome documents
// ---------------------------------------------------------------------------

/// What one transaction or receipt did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub receipt_ids: Vec<String>,
    #[serde(default)]
    pub gas_burnt: u64,
    /// Kept raw; see [`ExecutionOutcome::status`].
    pub status: Value,
}

impl ExecutionOutcome {
    pub fn status(&self) -> Result<ReceiptStatus, OutcomeError> {
        classify(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcomeWithId {
    pub id: CryptoHash,
    pub outcome: ExecutionOutcome,
}

/// The `broadcast_tx_commit` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalExecutionOutcome {
    /// Kept raw; see [`FinalExecutionOutcome::status`].
    pub status: Value,
    /// The transaction as the node echoes it back.
    #[serde(default)]
    pub transaction: Value,
    pub transaction_outcome: ExecutionOutcomeWithId,
    #[serde(default)]
    pub receipts_outcome: Vec<ExecutionOutcomeWithId>,
}

impl FinalExecutionOutcome {
    pub fn status(&self) -> Result<FinalStatus, OutcomeError> {
        classify(&self.status)
    }

    /// Decoded return value of a successful transaction, `None` for any
    /// other status.
    pub fn success_value(&self) -> Result<Option<Vec<u8>>, OutcomeError> {
        match self.status()? {
            Status::Structured(FinalExecutionStatus::SuccessValue(encoded)) => STANDARD
                .decode(encoded)
                .map(Some)
                .map_err(|e| OutcomeError::SuccessValue(e.to_string())),
            _ => Ok(None),
        }
    }

    /// Gas burnt by the transaction and all of its receipts.
    pub fn total_gas_burnt(&self) -> u64 {
        self.receipts_outcome
            .iter()
            .map(|r| r.outcome.gas_burnt)
            .fold(self.transaction_outcome.outcome.gas_burnt, u64::saturating_add)
    }

    /// Log lines in execution order: the transaction's, then each receipt's.
    pub fn logs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(&self.transaction_outcome)
            .chain(self.receipts_outcome.iter())
            .flat_map(|o| o.outcome.logs.iter().map(String::as_str))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ZERO_HASH: &str = "11111111111111111111111111111111";

    #[test]
    fn string_tags() {
        let s: FinalStatus = classify(&json!("Started")).unwrap();
        assert_eq!(s, Status::Basic(FinalExecutionStatusBasic::Started));

        let r: ReceiptStatus = classify(&json!("Pending")).unwrap();
        assert_eq!(r, Status::Basic(ExecutionStatusBasic::Pending));

        // Receipt-level tags are not transaction-level tags.
        let s: FinalStatus = classify(&json!("Pending")).unwrap();
        assert_eq!(s, Status::Unrecognized("Pending".to_string()));
    }

    #[test]
    fn unknown_tag_is_not_an_error() {
        let s: FinalStatus = classify_str("\"Frobnicating\"").unwrap();
        assert_eq!(s, Status::Unrecognized("Frobnicating".to_string()));
    }

    #[test]
    fn structured_success() {
        let s: FinalStatus = classify(&json!({"SuccessValue": ""})).unwrap();
        assert_eq!(
            s,
            Status::Structured(FinalExecutionStatus::SuccessValue(String::new()))
        );

        let r: ReceiptStatus = classify(&json!({"SuccessReceiptId": ZERO_HASH})).unwrap();
        assert_eq!(
            r,
            Status::Structured(ExecutionStatus::SuccessReceiptId(ZERO_HASH.to_string()))
        );
    }

    #[test]
    fn structured_failure_keeps_payload() {
        let s: FinalStatus = classify(&json!({
            "Failure": {"ActionError": {"index": 0, "kind": {"AccountDoesNotExist": {"account_id": "x"}}}}
        }))
        .unwrap();
        match s {
            Status::Structured(FinalExecutionStatus::Failure(map)) => {
                assert!(map.contains_key("ActionError"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_object_is_error() {
        let err = classify::<FinalExecutionStatusBasic, FinalExecutionStatus>(&json!({"Bogus": 1}))
            .unwrap_err();
        assert!(matches!(err, OutcomeError::Malformed(_)));

        let err = classify::<FinalExecutionStatusBasic, FinalExecutionStatus>(
            &json!({"SuccessValue": 5}),
        )
        .unwrap_err();
        assert!(matches!(err, OutcomeError::Malformed(_)));
    }

    #[test]
    fn other_shapes_rejected() {
        for raw in [json!(null), json!(3), json!(true), json!(["Started"])] {
            assert!(matches!(
                classify::<ExecutionStatusBasic, ExecutionStatus>(&raw),
                Err(OutcomeError::UnexpectedShape(_))
            ));
        }
        assert!(matches!(
            classify_str::<ExecutionStatusBasic, ExecutionStatus>("{not json"),
            Err(OutcomeError::InvalidJson(_))
        ));
    }

    fn outcome(status: Value) -> FinalExecutionOutcome {
        serde_json::from_value(json!({
            "status": status,
            "transaction": {},
            "transaction_outcome": {
                "id": ZERO_HASH,
                "outcome": {"logs": ["tx"], "receipt_ids": [], "gas_burnt": 100, "status": {"SuccessReceiptId": ZERO_HASH}}
            },
            "receipts_outcome": [
                {"id": ZERO_HASH, "outcome": {"logs": ["r1", "r2"], "receipt_ids": [], "gas_burnt": 250, "status": {"SuccessValue": ""}}},
                {"id": ZERO_HASH, "outcome": {"logs": [], "receipt_ids": [], "gas_burnt": 7, "status": "Pending"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn outcome_accessors() {
        // base64("42")
        let o = outcome(json!({"SuccessValue": "NDI="}));
        assert_eq!(o.success_value().unwrap(), Some(b"42".to_vec()));
        assert_eq!(o.total_gas_burnt(), 357);
        assert_eq!(o.logs().collect::<Vec<_>>(), vec!["tx", "r1", "r2"]);
        assert!(matches!(
            o.transaction_outcome.outcome.status().unwrap(),
            Status::Structured(ExecutionStatus::SuccessReceiptId(_))
        ));
        assert_eq!(
            o.receipts_outcome[1].outcome.status().unwrap(),
            Status::Basic(ExecutionStatusBasic::Pending)
        );
    }

    #[test]
    fn success_value_absent_for_other_statuses() {
        let o = outcome(json!("Started"));
        assert_eq!(o.success_value().unwrap(), None);

        let bad = outcome(json!({"SuccessValue": "%%"}));
        assert!(matches!(bad.success_value(), Err(OutcomeError::SuccessValue(_))));
    }
}
