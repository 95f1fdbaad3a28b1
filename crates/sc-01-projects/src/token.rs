//! # Token Ledger
//!
//! The mint and token-account operations the program performs when it creates
//! a project. Accounts written here are owned by the token program id.

use crate::domain::entities::{Mint, StoredAccount, TokenAccount};
use crate::errors::ProgramError;
use crate::ids::TOKEN_PROGRAM_ID;
use crate::ports::outbound::AccountStore;
use shared_types::Pubkey;

/// Decimals of every project token.
pub const PROJECT_TOKEN_DECIMALS: u8 = 9;

/// Creates a mint with zero supply.
pub fn initialize_mint(
    store: &mut dyn AccountStore,
    mint: Pubkey,
    decimals: u8,
    mint_authority: Pubkey,
    freeze_authority: Option<Pubkey>,
) -> Result<(), ProgramError> {
    if store.contains(&mint) {
        return Err(ProgramError::AccountAlreadyInUse(mint));
    }
    let account = Mint {
        mint_authority: Some(mint_authority),
        freeze_authority,
        decimals,
        supply: 0,
    };
    store.put(mint, StoredAccount::from_account(TOKEN_PROGRAM_ID, &account)?);
    Ok(())
}

/// Creates an empty token account for `mint` held by `owner`.
pub fn initialize_account(
    store: &mut dyn AccountStore,
    account: Pubkey,
    mint: Pubkey,
    owner: Pubkey,
) -> Result<(), ProgramError> {
    if store.contains(&account) {
        return Err(ProgramError::AccountAlreadyInUse(account));
    }
    // The mint must exist before accounts can hold it.
    load::<Mint>(store, &mint)?;
    let token_account = TokenAccount {
        mint,
        owner,
        amount: 0,
    };
    store.put(
        account,
        StoredAccount::from_account(TOKEN_PROGRAM_ID, &token_account)?,
    );
    Ok(())
}

/// Mints `amount` new tokens into `destination`.
pub fn mint_to(
    store: &mut dyn AccountStore,
    mint: Pubkey,
    destination: Pubkey,
    authority: Pubkey,
    amount: u64,
) -> Result<(), ProgramError> {
    let mut mint_account: Mint = load(store, &mint)?;
    let mut dest: TokenAccount = load(store, &destination)?;

    if mint_account.mint_authority != Some(authority) {
        return Err(ProgramError::TokenOwnerMismatch);
    }
    if dest.mint != mint {
        return Err(ProgramError::TokenMintMismatch);
    }

    mint_account.supply = mint_account
        .supply
        .checked_add(amount)
        .ok_or(ProgramError::TokenOverflow)?;
    dest.amount = dest
        .amount
        .checked_add(amount)
        .ok_or(ProgramError::TokenOverflow)?;

    store.put(mint, StoredAccount::from_account(TOKEN_PROGRAM_ID, &mint_account)?);
    store.put(destination, StoredAccount::from_account(TOKEN_PROGRAM_ID, &dest)?);
    Ok(())
}

/// Token balance of `account`, if it is a token account.
pub fn balance(store: &dyn AccountStore, account: &Pubkey) -> Option<u64> {
    load::<TokenAccount>(store, account).ok().map(|a| a.amount)
}

fn load<T: crate::domain::entities::ProgramAccount>(
    store: &dyn AccountStore,
    key: &Pubkey,
) -> Result<T, ProgramError> {
    let stored = store.get(key).ok_or(ProgramError::AccountNotInitialized)?;
    if stored.owner != TOKEN_PROGRAM_ID {
        return Err(ProgramError::AccountOwnedByWrongProgram);
    }
    stored.decode()
}
