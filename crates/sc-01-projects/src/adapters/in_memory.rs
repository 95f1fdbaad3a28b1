//! # In-Memory Account Stores
//!
//! `InMemoryAccounts` is the ledger held by the local cluster.
//! `StagedAccounts` buffers writes on top of another store so a failed
//! transaction leaves the ledger untouched.

use crate::domain::entities::StoredAccount;
use crate::ports::outbound::AccountStore;
use shared_types::Pubkey;
use std::collections::HashMap;

/// Account ledger backed by a hash map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    accounts: HashMap<Pubkey, StoredAccount>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryAccounts {
    fn get(&self, key: &Pubkey) -> Option<StoredAccount> {
        self.accounts.get(key).cloned()
    }

    fn put(&mut self, key: Pubkey, account: StoredAccount) {
        self.accounts.insert(key, account);
    }

    fn contains(&self, key: &Pubkey) -> bool {
        self.accounts.contains_key(key)
    }
}

/// Write buffer over a base store.
///
/// Reads see buffered writes first. Nothing reaches the base store until
/// [`commit`](Self::commit); dropping the buffer discards every write.
pub struct StagedAccounts<'a, S: AccountStore + ?Sized> {
    base: &'a mut S,
    pending: HashMap<Pubkey, StoredAccount>,
}

impl<'a, S: AccountStore + ?Sized> StagedAccounts<'a, S> {
    pub fn new(base: &'a mut S) -> Self {
        Self {
            base,
            pending: HashMap::new(),
        }
    }

    /// Number of buffered writes.
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Applies every buffered write to the base store.
    pub fn commit(self) -> usize {
        let count = self.pending.len();
        for (key, account) in self.pending {
            self.base.put(key, account);
        }
        count
    }
}

impl<S: AccountStore + ?Sized> AccountStore for StagedAccounts<'_, S> {
    fn get(&self, key: &Pubkey) -> Option<StoredAccount> {
        self.pending
            .get(key)
            .cloned()
            .or_else(|| self.base.get(key))
    }

    fn put(&mut self, key: Pubkey, account: StoredAccount) {
        self.pending.insert(key, account);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> StoredAccount {
        StoredAccount {
            owner: Pubkey::new([byte; 32]),
            data: vec![byte],
        }
    }

    #[test]
    fn test_in_memory_put_get() {
        let mut store = InMemoryAccounts::new();
        let key = Pubkey::new_unique();
        assert!(!store.contains(&key));
        store.put(key, account(1));
        assert_eq!(store.get(&key), Some(account(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_staged_reads_own_writes() {
        let mut base = InMemoryAccounts::new();
        let key = Pubkey::new_unique();
        base.put(key, account(1));

        let mut staged = StagedAccounts::new(&mut base);
        staged.put(key, account(2));
        assert_eq!(staged.get(&key), Some(account(2)));
        assert_eq!(staged.pending_writes(), 1);
    }

    #[test]
    fn test_staged_drop_discards() {
        let mut base = InMemoryAccounts::new();
        let key = Pubkey::new_unique();
        {
            let mut staged = StagedAccounts::new(&mut base);
            staged.put(key, account(7));
        }
        assert!(base.is_empty());
    }

    #[test]
    fn test_staged_commit_applies() {
        let mut base = InMemoryAccounts::new();
        let key = Pubkey::new_unique();
        let mut staged = StagedAccounts::new(&mut base);
        staged.put(key, account(7));
        assert_eq!(staged.commit(), 1);
        assert_eq!(base.get(&key), Some(account(7)));
    }
}
