//! Ledger records and the JSON shapes the RPC methods return.

use sc_01_projects::events::ProgramEvent;
use serde::{Deserialize, Serialize};
use shared_types::Pubkey;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// TRANSACTION ERRORS
// =============================================================================

/// Why a transaction was not committed.
///
/// Serializes the way clusters report it: unit variants as a bare string and
/// instruction failures as `{"InstructionError":[index,{"Custom":code}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TransactionError {
    /// Signature count does not match the message's signers.
    #[error("Transaction failed to sanitize accounts offsets correctly")]
    SanitizeFailure,

    /// A signature did not verify.
    #[error("Transaction did not pass signature verification")]
    SignatureFailure,

    /// The signature was already committed.
    #[error("This transaction has already been processed")]
    AlreadyProcessed,

    /// An instruction names a program the cluster does not host.
    #[error("Attempt to load a program that does not exist")]
    ProgramAccountNotFound,

    /// An instruction failed.
    #[error("Error processing Instruction {0}: {1}")]
    InstructionError(u8, InstructionError),
}

/// Instruction-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum InstructionError {
    /// Error code returned by the program.
    #[error("custom program error: {0:#x}")]
    Custom(u32),
}

impl TransactionError {
    /// Custom program error code, if an instruction failed with one.
    pub fn custom_code(&self) -> Option<u32> {
        match self {
            Self::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
            _ => None,
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Slot the transaction was committed in.
    pub slot: u64,
    /// Always `None` for committed transactions.
    pub err: Option<TransactionError>,
    /// Program log lines.
    pub logs: Vec<String>,
    /// Events decoded from the logs.
    pub events: Vec<ProgramEvent>,
}

/// Commitment reached by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationStatus {
    Processed,
    Confirmed,
    Finalized,
}

/// Entry of a `getSignatureStatuses` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    /// `None` once finalized.
    pub confirmations: Option<u64>,
    pub err: Option<TransactionError>,
    pub confirmation_status: ConfirmationStatus,
}

impl SignatureStatus {
    /// Status of a record. The localnet finalizes every commit immediately.
    pub fn from_record(record: &TransactionRecord) -> Self {
        Self {
            slot: record.slot,
            confirmations: None,
            err: record.err.clone(),
            confirmation_status: ConfirmationStatus::Finalized,
        }
    }
}

/// Result of `getAccountInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub owner: Pubkey,
    /// Account data, hex encoded.
    pub data: String,
    /// Data length in bytes.
    pub space: usize,
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Request and transaction counters.
#[derive(Debug, Default)]
pub struct LocalnetStats {
    requests_served: AtomicU64,
    transactions_received: AtomicU64,
    transactions_committed: AtomicU64,
    transactions_failed: AtomicU64,
}

/// Point-in-time copy of [`LocalnetStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub requests_served: u64,
    pub transactions_received: u64,
    pub transactions_committed: u64,
    pub transactions_failed: u64,
}

impl LocalnetStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transaction(&self, committed: bool) {
        self.transactions_received.fetch_add(1, Ordering::Relaxed);
        if committed {
            self.transactions_committed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.transactions_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_served: self.requests_served.load(Ordering::Relaxed),
            transactions_received: self.transactions_received.load(Ordering::Relaxed),
            transactions_committed: self.transactions_committed.load(Ordering::Relaxed),
            transactions_failed: self.transactions_failed.load(Ordering::Relaxed),
        }
    }
}
