//! # Bank
//!
//! Holds the account ledger and the hosted programs, and commits transactions.
//!
//! ## Processing Order
//!
//! 1. At most `MAX_INSTRUCTIONS` instructions, and one signature per signer
//! 2. Every signature must verify against the encoded message
//! 3. The fee payer's signature must not already be committed
//! 4. Instructions run in order against a staged view of the ledger
//! 5. All writes are committed together, or none are

use crate::domain::ledger::{InstructionError, TransactionError, TransactionRecord};
use ed25519_dalek::{Signature, VerifyingKey};
use sc_01_projects::domain::entities::{Clock, ExecutionLog, StoredAccount};
use sc_01_projects::events::decode_event_log;
use sc_01_projects::prelude::{
    AccountStore, InMemoryAccounts, InvocationContext, ProgramApi, StagedAccounts,
};
use shared_types::{Pubkey, Transaction, TxSignature};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Most instructions a message may carry; failures report the index as a `u8`.
pub const MAX_INSTRUCTIONS: usize = 256;

/// A transaction that executed but was not committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFailure {
    pub err: TransactionError,
    /// Logs produced before the failure.
    pub logs: Vec<String>,
}

impl TransactionFailure {
    fn rejected(err: TransactionError) -> Self {
        Self {
            err,
            logs: Vec::new(),
        }
    }
}

/// Ledger state of the local cluster.
pub struct Bank {
    accounts: InMemoryAccounts,
    programs: HashMap<Pubkey, Arc<dyn ProgramApi>>,
    records: HashMap<TxSignature, TransactionRecord>,
    slot: u64,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl Bank {
    /// An empty bank at slot 0 hosting no programs.
    pub fn new() -> Self {
        Self {
            accounts: InMemoryAccounts::new(),
            programs: HashMap::new(),
            records: HashMap::new(),
            slot: 0,
        }
    }

    /// Deploys a program at its own address.
    pub fn register_program(&mut self, program: Arc<dyn ProgramApi>) {
        let id = program.program_id();
        info!(program_id = %id, "program deployed");
        self.programs.insert(id, program);
    }

    /// Whether a program is deployed at `id`.
    pub fn has_program(&self, id: &Pubkey) -> bool {
        self.programs.contains_key(id)
    }

    /// Slot of the last committed transaction.
    pub fn slot(&self) -> u64 {
        self.slot
    }

    pub fn account(&self, key: &Pubkey) -> Option<StoredAccount> {
        self.accounts.get(key)
    }

    pub fn record(&self, signature: &TxSignature) -> Option<&TransactionRecord> {
        self.records.get(signature)
    }

    /// Number of committed transactions.
    pub fn transaction_count(&self) -> usize {
        self.records.len()
    }

    /// Verifies, executes and commits `tx`.
    ///
    /// Returns the transaction signature on commit. On failure the ledger is
    /// unchanged.
    pub fn process_transaction(
        &mut self,
        tx: &Transaction,
    ) -> Result<TxSignature, TransactionFailure> {
        let signature = verify_signatures(tx).map_err(TransactionFailure::rejected)?;

        if self.records.contains_key(&signature) {
            warn!(signature = %signature, "duplicate transaction");
            return Err(TransactionFailure::rejected(
                TransactionError::AlreadyProcessed,
            ));
        }

        let slot = self.slot + 1;
        let clock = Clock {
            slot,
            unix_timestamp: unix_timestamp(),
        };

        let mut logs = ExecutionLog::new();
        let mut staged = StagedAccounts::new(&mut self.accounts);

        // Sanitized above: every index fits in a u8.
        for (index, ix) in (0..=u8::MAX).zip(&tx.message.instructions) {
            let Some(program) = self.programs.get(&ix.program_id) else {
                return Err(TransactionFailure {
                    err: TransactionError::ProgramAccountNotFound,
                    logs: logs.into_lines(),
                });
            };

            logs.push(format!("Program {} invoke [1]", ix.program_id));
            let ctx = InvocationContext {
                program_id: ix.program_id,
                accounts: &ix.accounts,
                clock,
            };

            if let Err(e) = program.process(&ctx, &ix.data, &mut staged, &mut logs) {
                let code = e.code();
                logs.log(format!(
                    "Error Code: {}. Error Number: {}. Error Message: {}.",
                    e.name(),
                    code,
                    e
                ));
                logs.push(format!(
                    "Program {} failed: custom program error: {:#x}",
                    ix.program_id, code
                ));
                debug!(signature = %signature, index, code, "instruction failed");
                return Err(TransactionFailure {
                    err: TransactionError::InstructionError(index, InstructionError::Custom(code)),
                    logs: logs.into_lines(),
                });
            }

            logs.push(format!("Program {} success", ix.program_id));
        }

        let writes = staged.commit();
        self.slot = slot;

        let logs = logs.into_lines();
        let events = logs.iter().filter_map(|l| decode_event_log(l)).collect();
        self.records.insert(
            signature,
            TransactionRecord {
                slot,
                err: None,
                logs,
                events,
            },
        );

        info!(signature = %signature, slot, writes, "transaction committed");
        Ok(signature)
    }
}

/// Checks every signature and returns the fee payer's.
pub fn verify_signatures(tx: &Transaction) -> Result<TxSignature, TransactionError> {
    if tx.message.instructions.len() > MAX_INSTRUCTIONS {
        return Err(TransactionError::SanitizeFailure);
    }

    let signers = tx.message.signer_keys();
    if tx.signatures.len() != signers.len() {
        return Err(TransactionError::SanitizeFailure);
    }

    let message = tx
        .message
        .serialize()
        .map_err(|_| TransactionError::SanitizeFailure)?;

    for (key, sig) in signers.iter().zip(&tx.signatures) {
        let verifying_key =
            VerifyingKey::from_bytes(key.as_bytes()).map_err(|_| TransactionError::SignatureFailure)?;
        let signature = Signature::from_bytes(sig.as_bytes());
        verifying_key
            .verify_strict(&message, &signature)
            .map_err(|_| TransactionError::SignatureFailure)?;
    }

    tx.signature()
        .copied()
        .ok_or(TransactionError::SanitizeFailure)
}

fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
