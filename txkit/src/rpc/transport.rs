//! # JSON-RPC Boundary
//!
//! Envelope types for JSON-RPC 2.0 and the [`RpcTransport`] trait, the one
//! capability the rest of the crate needs from the network. Connection
//! handling, authentication, and timeouts belong to whoever implements the
//! trait; an HTTP client, a websocket, or a scripted test double all fit.
//!
//! ## Methods used
//!
//! | Method                 | Params                                  |
//! |------------------------|-----------------------------------------|
//! | `broadcast_tx_commit`  | `[<base64 signed transaction>]`         |
//! | `query`                | `{"request_type": "view_access_key", ..}` |
//! | `block`                | `{"finality": "final"}`                 |

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::INVALID_NONCE_MARKER;

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Echoed back in the response.
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: Value, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response.
///
/// A conforming node sets exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Collapses the envelope into the value a transport returns.
    ///
    /// An error member wins over a result. A response with neither yields
    /// `Value::Null`, which the broadcaster treats as an empty result.
    pub fn into_result(self) -> Result<Value, TransportError> {
        match (self.error, self.result) {
            (Some(error), _) => Err(TransportError::Remote(error)),
            (None, Some(result)) => Ok(result),
            (None, None) => Ok(Value::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 error object.
///
/// Nodes put the interesting part (e.g. `{"TxExecutionError": {"InvalidTxError":
/// {"InvalidNonce": ..}}}`) in `data`, so `Display` includes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Generic server error (`-32000`), the code nodes use for rejected
    /// transactions.
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(-32000, message)
    }

    /// Whether the node rejected the transaction for a stale or reused nonce.
    pub fn is_invalid_nonce(&self) -> bool {
        self.message.contains(INVALID_NONCE_MARKER)
            || self
                .data
                .as_ref()
                .map(|data| data.to_string().contains(INVALID_NONCE_MARKER))
                .unwrap_or(false)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with code: {}", self.message, self.code)?;
        if let Some(data) = &self.data {
            write!(f, " (data: {})", data)?;
        }
        Ok(())
    }
}

impl std::error::Error for RpcError {}

/// Failure of a single RPC call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    /// The node answered with a JSON-RPC error.
    #[error("rpc error: {0}")]
    Remote(RpcError),

    /// The call never produced a response: connection, timeout, bad JSON.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The caller's deadline or cancellation fired mid-call.
    #[error("rpc call cancelled")]
    Cancelled,
}

impl TransportError {
    /// Only a remote nonce rejection qualifies. Transport failures and
    /// cancellations never do, even if their text happens to match.
    pub fn is_invalid_nonce(&self) -> bool {
        matches!(self, TransportError::Remote(e) if e.is_invalid_nonce())
    }
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

/// Sends one JSON-RPC call and returns its `result` member.
///
/// Implementations map JSON-RPC error members to
/// [`TransportError::Remote`] (see [`RpcResponse::into_result`]) and
/// everything else that goes wrong to [`TransportError::Transport`] or
/// [`TransportError::Cancelled`].
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for Arc<T> {
    async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        (**self).call(method, params).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
