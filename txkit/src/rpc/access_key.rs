//! Nonce-refreshing transaction factory.
//!
//! [`AccessKeyFactory`] rebuilds the transaction from scratch on every
//! attempt: it reads the signing key's current nonce, fetches a final block
//! hash, builds with `nonce + 1`, and signs. After a nonce conflict the next
//! attempt therefore picks up whatever nonce the competing transaction used.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::broadcast::{BroadcastError, PreparedTransaction, TransactionFactory};
use super::transport::RpcTransport;
use crate::config::{BLOCK_HASH_FINALITY, BLOCK_METHOD, NONCE_QUERY_FINALITY, QUERY_METHOD};
use crate::crypto::hash::CryptoHash;
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::transaction::action::{AccessKeyPermission, Action, FunctionCallPermission};
use crate::transaction::builder::Transaction;
use crate::transaction::signing::sign_transaction;
use crate::transaction::types::{AccountId, Nonce};

/// An access key as reported by `view_access_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyView {
    /// Block the view was read at.
    pub block_hash: CryptoHash,
    pub block_height: u64,
    pub nonce: Nonce,
    pub permission: AccessKeyPermission,
}

#[derive(Deserialize)]
struct RawAccessKeyView {
    block_hash: CryptoHash,
    #[serde(default)]
    block_height: u64,
    nonce: Nonce,
    permission: Value,
    /// Some nodes report query failures inside an otherwise successful result.
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct FunctionCallPermissionView {
    #[serde(rename = "FunctionCall")]
    function_call: FunctionCallPermission,
}

#[derive(Deserialize)]
struct BlockView {
    header: BlockHeaderView,
}

#[derive(Deserialize)]
struct BlockHeaderView {
    hash: CryptoHash,
}

/// Decodes the permission field, which is either the string `"FullAccess"`
/// or an object `{"FunctionCall": {...}}`.
pub fn decode_permission(raw: &Value) -> Result<AccessKeyPermission, BroadcastError> {
    match raw {
        Value::String(tag) if tag == "FullAccess" => Ok(AccessKeyPermission::FullAccess),
        Value::Object(_) => FunctionCallPermissionView::deserialize(raw)
            .map(|view| AccessKeyPermission::FunctionCall(view.function_call))
            .map_err(|e| BroadcastError::Query(format!("unmarshaling permission: {}", e))),
        other => Err(BroadcastError::Query(format!(
            "unexpected permission: {}",
            other
        ))),
    }
}

// ---------------------------------------------------------------------------
// AccessKeyFactory
// ---------------------------------------------------------------------------

pub struct AccessKeyFactory<T> {
    transport: T,
    signer_id: AccountId,
    private_key: PrivateKey,
    receiver_id: AccountId,
    actions: Vec<Action>,
}

impl<T: RpcTransport> AccessKeyFactory<T> {
    pub fn new(
        transport: T,
        signer_id: impl Into<AccountId>,
        private_key: PrivateKey,
        receiver_id: impl Into<AccountId>,
        actions: Vec<Action>,
    ) -> Self {
        Self {
            transport,
            signer_id: signer_id.into(),
            private_key,
            receiver_id: receiver_id.into(),
            actions,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.private_key.public_key()
    }

    /// Reads the signing key's access key at optimistic finality.
    pub async fn view_access_key(&self) -> Result<AccessKeyView, BroadcastError> {
        let params = json!({
            "request_type": "view_access_key",
            "finality": NONCE_QUERY_FINALITY,
            "account_id": self.signer_id,
            "public_key": self.public_key().to_string(),
        });
        let result = self.transport.call(QUERY_METHOD, params).await?;
        let raw: RawAccessKeyView = serde_json::from_value(result)
            .map_err(|e| BroadcastError::Query(format!("decoding access key view: {}", e)))?;
        if let Some(error) = raw.error.filter(|e| !e.is_empty()) {
            return Err(BroadcastError::Query(format!("error returned in body: {}", error)));
        }
        Ok(AccessKeyView {
            block_hash: raw.block_hash,
            block_height: raw.block_height,
            nonce: raw.nonce,
            permission: decode_permission(&raw.permission)?,
        })
    }

    /// Hash of the latest final block.
    pub async fn latest_block_hash(&self) -> Result<CryptoHash, BroadcastError> {
        let result = self
            .transport
            .call(BLOCK_METHOD, json!({ "finality": BLOCK_HASH_FINALITY }))
            .await?;
        let block: BlockView = serde_json::from_value(result)
            .map_err(|e| BroadcastError::Query(format!("decoding block: {}", e)))?;
        Ok(block.header.hash)
    }
}

#[async_trait]
impl<T: RpcTransport> TransactionFactory for AccessKeyFactory<T> {
    async fn prepare(&mut self, attempt: u32) -> Result<PreparedTransaction, BroadcastError> {
        let access_key = self.view_access_key().await?;
        let block_hash = self.latest_block_hash().await?;
        let nonce = access_key.nonce.checked_add(1).ok_or_else(|| {
            BroadcastError::Query("access key nonce is at its maximum".to_string())
        })?;
        debug!(
            signer = %self.signer_id,
            nonce,
            block_hash = %block_hash,
            attempt,
            "building transaction"
        );

        let tx = Transaction::new(
            self.signer_id.clone(),
            self.public_key(),
            nonce,
            self.receiver_id.clone(),
            block_hash,
            self.actions.clone(),
        );
        let (hash, signed) = sign_transaction(tx, &self.private_key)?;
        Ok(PreparedTransaction { hash, signed })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::rpc::transport::TransportError;
    use crate::transaction::types::Balance;

    #[derive(Default)]
    struct FakeNode {
        nonces: Mutex<VecDeque<u64>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl RpcTransport for FakeNode {
        async fn call(&self, method: &str, params: Value) -> Result<Value, TransportError> {
            self.calls.lock().unwrap().push((method.to_string(), params));
            match method {
                "query" => {
                    let nonce = self.nonces.lock().unwrap().pop_front().unwrap_or(0);
                    Ok(json!({
                        "block_hash": CryptoHash([1; 32]).to_string(),
                        "block_height": 10,
                        "nonce": nonce,
                        "permission": "FullAccess"
                    }))
                }
                "block" => Ok(json!({"header": {"hash": CryptoHash([2; 32]).to_string()}})),
                other => Err(TransportError::Transport(format!("unexpected {}", other))),
            }
        }
    }

    fn factory(node: Arc<FakeNode>) -> AccessKeyFactory<Arc<FakeNode>> {
        AccessKeyFactory::new(
            node,
            "alice.testnet",
            PrivateKey::from_seed(&[9u8; 32]),
            "bob.testnet",
            vec![Action::transfer(Balance::from_yocto(1000))],
        )
    }

    #[test]
    fn permission_sniffing() {
        assert_eq!(
            decode_permission(&json!("FullAccess")).unwrap(),
            AccessKeyPermission::FullAccess
        );

        let limited = decode_permission(&json!({
            "FunctionCall": {"allowance": "250", "receiver_id": "app.testnet", "method_names": ["vote"]}
        }))
        .unwrap();
        match limited {
            AccessKeyPermission::FunctionCall(p) => {
                assert_eq!(p.allowance, Some(Balance::from_yocto(250)));
                assert_eq!(p.receiver_id, "app.testnet");
                assert_eq!(p.method_names, vec!["vote".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }

        let unlimited = decode_permission(&json!({
            "FunctionCall": {"allowance": null, "receiver_id": "app.testnet", "method_names": []}
        }))
        .unwrap();
        assert!(matches!(
            unlimited,
            AccessKeyPermission::FunctionCall(FunctionCallPermission { allowance: None, .. })
        ));

        assert!(decode_permission(&json!("SomethingElse")).is_err());
        assert!(decode_permission(&json!({"FunctionCall": 3})).is_err());
    }

    #[tokio::test]
    async fn prepare_uses_next_nonce_and_final_block() {
        let node = Arc::new(FakeNode::default());
        node.nonces.lock().unwrap().extend([41, 57]);
        let mut f = factory(node.clone());

        let first = f.prepare(1).await.unwrap();
        assert_eq!(first.signed.transaction.nonce, 42);
        assert_eq!(first.signed.transaction.block_hash, CryptoHash([2; 32]));
        assert!(first.signed.verify());
        assert_eq!(first.hash, first.signed.hash().unwrap());

        // A conflicting transaction bumped the key; the rebuild follows it.
        let second = f.prepare(2).await.unwrap();
        assert_eq!(second.signed.transaction.nonce, 58);
        assert_ne!(first.hash, second.hash);

        let calls = node.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].0, "query");
        assert_eq!(calls[0].1["request_type"], "view_access_key");
        assert_eq!(calls[0].1["finality"], "optimistic");
        assert_eq!(calls[0].1["account_id"], "alice.testnet");
        assert_eq!(calls[1].0, "block");
        assert_eq!(calls[1].1, json!({"finality": "final"}));
    }

    struct ErrorInBody;

    #[async_trait]
    impl RpcTransport for ErrorInBody {
        async fn call(&self, _method: &str, _params: Value) -> Result<Value, TransportError> {
            Ok(json!({
                "block_hash": CryptoHash::default().to_string(),
                "block_height": 1,
                "nonce": 0,
                "permission": "FullAccess",
                "error": "access key does not exist"
            }))
        }
    }

    #[tokio::test]
    async fn error_in_body_is_reported() {
        let f = AccessKeyFactory::new(
            ErrorInBody,
            "alice.testnet",
            PrivateKey::from_seed(&[9u8; 32]),
            "bob.testnet",
            vec![],
        );
        let err = f.view_access_key().await.unwrap_err();
        assert!(matches!(err, BroadcastError::Query(msg) if msg.contains("does not exist")));
    }
}
