//! JSON-RPC method routing.
//!
//! Methods follow the names and result shapes public clusters use, so a client
//! written against this endpoint works unchanged against a real one.

use crate::bank::{Bank, TransactionFailure};
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::ledger::{AccountInfo, LocalnetStats, SignatureStatus, TransactionError};
use parking_lot::RwLock;
use serde_json::{json, Value};
use shared_types::{Pubkey, Transaction, TxSignature};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Most signatures a single `getSignatureStatuses` call may query.
pub const MAX_SIGNATURE_STATUSES: usize = 256;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<RwLock<Bank>>,
    pub stats: Arc<LocalnetStats>,
    pub max_batch_size: usize,
}

/// Route a JSON-RPC method to its handler.
pub fn route_method(state: &AppState, method: &str, params: Option<&Value>) -> ApiResult<Value> {
    match method {
        "getHealth" => Ok(json!("ok")),
        "getVersion" => Ok(json!({
            "localnet-version": crate::VERSION,
            "program": sc_01_projects::PROGRAM_NAME,
        })),
        "getSlot" => Ok(json!(state.bank.read().slot())),
        "sendTransaction" => {
            let wire: String = parse_param(params, 0)?;
            send_transaction(state, &wire).map(|sig| json!(sig))
        }
        "getSignatureStatuses" => {
            let signatures: Vec<TxSignature> = parse_param(params, 0)?;
            get_signature_statuses(state, &signatures)
        }
        "getTransaction" => {
            let signature: TxSignature = parse_param(params, 0)?;
            let bank = state.bank.read();
            Ok(bank
                .record(&signature)
                .map(|r| json!(r))
                .unwrap_or(Value::Null))
        }
        "getAccountInfo" => {
            let key: Pubkey = parse_param(params, 0)?;
            let bank = state.bank.read();
            Ok(bank
                .account(&key)
                .map(|a| {
                    json!(AccountInfo {
                        owner: a.owner,
                        space: a.data.len(),
                        data: hex::encode(&a.data),
                    })
                })
                .unwrap_or(Value::Null))
        }
        _ => Err(ApiError::method_not_found(method)),
    }
}

/// Decodes, verifies, executes and commits one transaction.
#[instrument(skip_all)]
fn send_transaction(state: &AppState, wire: &str) -> ApiResult<TxSignature> {
    let tx = Transaction::from_wire(wire).map_err(|e| {
        state.stats.record_transaction(false);
        ApiError::from(e)
    })?;

    // The write lock serializes transactions for the whole execution.
    let result = state.bank.write().process_transaction(&tx);
    state.stats.record_transaction(result.is_ok());

    result.map_err(|TransactionFailure { err, logs }| {
        warn!(error = %err, "transaction failed");
        match err {
            TransactionError::SanitizeFailure | TransactionError::SignatureFailure => {
                ApiError::signature_verification_failure()
            }
            other => ApiError::simulation_failed(&other, &logs),
        }
    })
}

fn get_signature_statuses(state: &AppState, signatures: &[TxSignature]) -> ApiResult<Value> {
    if signatures.len() > MAX_SIGNATURE_STATUSES {
        return Err(ApiError::invalid_params(format!(
            "too many signatures: {} (max {})",
            signatures.len(),
            MAX_SIGNATURE_STATUSES
        )));
    }
    let bank = state.bank.read();
    let value: Vec<Option<SignatureStatus>> = signatures
        .iter()
        .map(|s| bank.record(s).map(SignatureStatus::from_record))
        .collect();
    debug!(count = value.len(), "signature statuses");
    Ok(json!({
        "context": { "slot": bank.slot() },
        "value": value,
    }))
}

/// Parse a required parameter from JSON-RPC params array.
pub fn parse_param<T: serde::de::DeserializeOwned>(
    params: Option<&Value>,
    index: usize,
) -> ApiResult<T> {
    let param = params
        .and_then(|p| {
            if p.is_array() {
                p.get(index)
            } else if index == 0 {
                Some(p)
            } else {
                None
            }
        })
        .ok_or_else(|| ApiError::invalid_params(format!("missing parameter at index {}", index)))?;

    serde_json::from_value(param.clone())
        .map_err(|e| ApiError::invalid_params(format!("invalid parameter at index {}: {}", index, e)))
}
