//! JSON-RPC transport.
//!
//! Every call is exactly one HTTP POST. Nothing is retried: a failed call is
//! reported to the caller as-is.

use crate::config::Commitment;
use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{Pubkey, Transaction, TxSignature};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    /// A `null` result is meaningful (record not found), so absent and null
    /// both read as `Value::Null`.
    #[serde(default)]
    result: Value,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    data: Option<Value>,
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Entry of a `getSignatureStatuses` result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    pub confirmations: Option<u64>,
    pub err: Option<Value>,
    pub confirmation_status: Option<Commitment>,
}

impl SignatureStatus {
    /// Whether the transaction succeeded and reached `commitment`.
    pub fn satisfies(&self, commitment: Commitment) -> bool {
        self.err.is_none()
            && self
                .confirmation_status
                .is_some_and(|status| status >= commitment)
    }
}

#[derive(Debug, Deserialize)]
struct SignatureStatuses {
    value: Vec<Option<SignatureStatus>>,
}

/// Result of `getTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionDetails {
    pub slot: u64,
    pub err: Option<Value>,
    #[serde(default)]
    pub logs: Vec<String>,
    /// Events decoded by the cluster, as `{ "name": ..., "data": ... }`.
    #[serde(default)]
    pub events: Vec<Value>,
}

/// Result of `getAccountInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountData {
    pub owner: Pubkey,
    /// Hex-encoded data.
    pub data: String,
    pub space: usize,
}

impl AccountData {
    /// Decoded account bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, ClientError> {
        hex::decode(&self.data)
            .map_err(|e| ClientError::InvalidResponse(format!("account data: {e}")))
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// A JSON-RPC client bound to one cluster endpoint.
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a client whose requests time out after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("http client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of requests this client has sent.
    pub fn requests_sent(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed) - 1
    }

    /// Sends one request and decodes its result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        trace!(id, method, "rpc request");

        let response = self.http.post(&self.url).json(&request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: JsonRpcResponse = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Transport(format!("HTTP {status}")));
            }
            Err(e) => return Err(ClientError::InvalidResponse(e.to_string())),
        };

        if let Some(error) = envelope.error {
            debug!(id, method, code = error.code, message = %error.message, "rpc error");
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        serde_json::from_value(envelope.result)
            .map_err(|e| ClientError::InvalidResponse(format!("invalid {method} result: {e}")))
    }

    pub async fn get_health(&self) -> Result<String, ClientError> {
        self.call("getHealth", json!([])).await
    }

    pub async fn get_version(&self) -> Result<Value, ClientError> {
        self.call("getVersion", json!([])).await
    }

    pub async fn get_slot(&self) -> Result<u64, ClientError> {
        self.call("getSlot", json!([])).await
    }

    /// Submits a signed transaction and returns its signature.
    pub async fn send_transaction(&self, tx: &Transaction) -> Result<TxSignature, ClientError> {
        let wire = tx
            .to_wire()
            .map_err(|e| ClientError::InvalidArguments {
                method: "sendTransaction".into(),
                reason: e.to_string(),
            })?;
        self.call("sendTransaction", json!([wire])).await
    }

    pub async fn get_signature_statuses(
        &self,
        signatures: &[TxSignature],
    ) -> Result<Vec<Option<SignatureStatus>>, ClientError> {
        let statuses: SignatureStatuses = self
            .call("getSignatureStatuses", json!([signatures]))
            .await?;
        Ok(statuses.value)
    }

    pub async fn get_transaction(
        &self,
        signature: &TxSignature,
    ) -> Result<Option<TransactionDetails>, ClientError> {
        self.call("getTransaction", json!([signature])).await
    }

    pub async fn get_account_info(
        &self,
        address: &Pubkey,
    ) -> Result<Option<AccountData>, ClientError> {
        self.call("getAccountInfo", json!([address])).await
    }
}
