//! # Driven Ports (SPI - Outbound)
//!
//! What the program needs from its host.

use crate::domain::entities::StoredAccount;
use shared_types::Pubkey;

/// Account storage the program reads from and writes to.
///
/// Implementations: `InMemoryAccounts` (the cluster's ledger) and
/// `StagedAccounts` (a write buffer committed only on success).
pub trait AccountStore {
    /// Returns a copy of the account, if it exists.
    fn get(&self, key: &Pubkey) -> Option<StoredAccount>;

    /// Creates or replaces the account.
    fn put(&mut self, key: Pubkey, account: StoredAccount);

    /// Whether the account exists.
    fn contains(&self, key: &Pubkey) -> bool {
        self.get(key).is_some()
    }
}
