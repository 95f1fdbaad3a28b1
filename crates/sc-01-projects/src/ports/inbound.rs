//! # Driving Ports (API - Inbound)
//!
//! The interface a cluster uses to run the program.

use crate::domain::entities::{Clock, ExecutionLog};
use crate::errors::ProgramError;
use crate::ports::outbound::AccountStore;
use shared_types::{AccountMeta, Pubkey};

/// Everything an instruction can see besides its data.
#[derive(Debug, Clone, Copy)]
pub struct InvocationContext<'a> {
    /// The program being invoked.
    pub program_id: Pubkey,
    /// Accounts passed by the instruction, in order.
    ///
    /// `is_signer` is trusted: the cluster has already verified a signature for
    /// every account flagged as a signer.
    pub accounts: &'a [AccountMeta],
    /// Cluster time.
    pub clock: Clock,
}

impl<'a> InvocationContext<'a> {
    /// Returns the account at `index` or `AccountNotEnoughKeys`.
    pub fn account(&self, index: usize) -> Result<&'a AccountMeta, ProgramError> {
        self.accounts
            .get(index)
            .ok_or(ProgramError::AccountNotEnoughKeys)
    }
}

/// A program the cluster can execute.
pub trait ProgramApi: Send + Sync {
    /// Address the program is deployed at.
    fn program_id(&self) -> Pubkey;

    /// Processes one instruction.
    ///
    /// On error the caller must discard every write made to `store`.
    fn process(
        &self,
        ctx: &InvocationContext<'_>,
        data: &[u8],
        store: &mut dyn AccountStore,
        logs: &mut ExecutionLog,
    ) -> Result<(), ProgramError>;
}
