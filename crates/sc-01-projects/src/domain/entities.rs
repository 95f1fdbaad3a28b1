//! # Core Domain Entities
//!
//! Accounts owned by the program and the token program, plus the execution
//! context every instruction sees.

use crate::errors::ProgramError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{Discriminator, Pubkey};

// =============================================================================
// STORED ACCOUNT
// =============================================================================

/// Raw account as held by an [`AccountStore`](crate::ports::outbound::AccountStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    /// Program allowed to modify the data.
    pub owner: Pubkey,
    /// Discriminator followed by the encoded account.
    pub data: Vec<u8>,
}

impl StoredAccount {
    /// Encodes `account` into a new stored account owned by `owner`.
    pub fn from_account<T: ProgramAccount>(owner: Pubkey, account: &T) -> Result<Self, ProgramError> {
        Ok(Self {
            owner,
            data: account.try_to_vec()?,
        })
    }

    /// Decodes the data as `T`.
    pub fn decode<T: ProgramAccount>(&self) -> Result<T, ProgramError> {
        T::try_from_slice(&self.data)
    }
}

/// A typed account with a discriminator-prefixed binary layout.
pub trait ProgramAccount: Serialize + DeserializeOwned {
    /// `sha256("account:<Name>")[..8]`.
    const DISCRIMINATOR: Discriminator;

    /// Encodes as discriminator followed by the bincode body.
    fn try_to_vec(&self) -> Result<Vec<u8>, ProgramError> {
        let body = bincode::serialize(self).map_err(|_| ProgramError::AccountDidNotSerialize)?;
        let mut out = Vec::with_capacity(8 + body.len());
        out.extend_from_slice(&Self::DISCRIMINATOR);
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Decodes, checking the discriminator first.
    fn try_from_slice(data: &[u8]) -> Result<Self, ProgramError> {
        let tag = data
            .get(..8)
            .ok_or(ProgramError::AccountDiscriminatorNotFound)?;
        if tag != Self::DISCRIMINATOR {
            return Err(ProgramError::AccountDiscriminatorMismatch);
        }
        bincode::deserialize(&data[8..]).map_err(|_| ProgramError::AccountDidNotDeserialize)
    }
}

// =============================================================================
// PROJECT
// =============================================================================

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectState {
    Active,
    Completed,
    Cancelled,
}

impl ProjectState {
    /// All states in declaration order (the order of their wire index).
    pub const ALL: [ProjectState; 3] = [Self::Active, Self::Completed, Self::Cancelled];

    /// Variant name as published in the IDL.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// A registered collaborative project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Address of the project account itself.
    pub id: Pubkey,
    pub name: String,
    pub description: String,
    pub state: ProjectState,
    /// Mint of the project's token.
    pub token_mint: Pubkey,
    /// Account that created the project; the only one allowed to update it.
    pub creator: Pubkey,
    /// Tokens minted into the project vault at creation.
    pub total_allocation: u64,
    /// Cluster unix timestamp at creation.
    pub created_at: i64,
}

impl Project {
    /// Bytes to allocate for a project with the given strings.
    pub fn space(name: &str, description: &str) -> usize {
        8 +  // discriminator
        32 + // id
        8 + name.len() + // name
        8 + description.len() + // description
        4 +  // state
        32 + // token_mint
        32 + // creator
        8 +  // total_allocation
        8 // created_at
    }
}

impl ProgramAccount for Project {
    const DISCRIMINATOR: Discriminator = [205, 168, 189, 202, 181, 247, 142, 19];
}

// =============================================================================
// TOKEN ACCOUNTS
// =============================================================================

/// A token mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mint {
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub decimals: u8,
    pub supply: u64,
}

impl ProgramAccount for Mint {
    const DISCRIMINATOR: Discriminator = [80, 188, 245, 20, 95, 138, 57, 156];
}

/// A balance of one mint held for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl ProgramAccount for TokenAccount {
    const DISCRIMINATOR: Discriminator = [220, 131, 236, 16, 145, 206, 207, 54];
}

// =============================================================================
// EXECUTION CONTEXT
// =============================================================================

/// Cluster time as seen by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Clock {
    pub slot: u64,
    pub unix_timestamp: i64,
}

/// Log lines produced while processing, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionLog {
    lines: Vec<String>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends `Program log: <msg>`.
    pub fn log(&mut self, msg: impl AsRef<str>) {
        self.lines.push(format!("Program log: {}", msg.as_ref()));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

// =============================================================================
// TESTS
// =============================================================================
