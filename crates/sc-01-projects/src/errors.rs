//! # Error Types
//!
//! Every way an instruction can fail. Each error carries the numeric code the
//! cluster reports back to clients.

use shared_types::Pubkey;
use thiserror::Error;

/// First code reserved for program-defined errors.
pub const CUSTOM_ERROR_OFFSET: u32 = 6000;

// =============================================================================
// PROJECT ERRORS
// =============================================================================

/// Errors defined by the supercollab program itself.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProjectError {
    /// The project is already in the requested state.
    #[error("Invalid state transition")]
    InvalidStateTransition,
}

impl ProjectError {
    /// All program-defined errors, in code order.
    pub const ALL: [ProjectError; 1] = [ProjectError::InvalidStateTransition];

    /// Numeric code (6000 + position).
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidStateTransition => CUSTOM_ERROR_OFFSET,
        }
    }

    /// Variant name as published in the IDL.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidStateTransition => "InvalidStateTransition",
        }
    }
}

// =============================================================================
// PROGRAM ERRORS
// =============================================================================

/// Errors that can occur while processing an instruction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// Instruction data shorter than a discriminator.
    #[error("8 byte instruction identifier not provided")]
    InstructionMissing,

    /// Discriminator does not name any instruction.
    #[error("Fallback functions are not supported")]
    InstructionFallbackNotFound,

    /// Arguments could not be decoded.
    #[error("The program could not deserialize the given instruction")]
    InstructionDidNotDeserialize,

    /// Arguments could not be encoded.
    #[error("The program could not serialize the given instruction")]
    InstructionDidNotSerialize,

    /// An account's stored owner key does not match the signer given.
    #[error("A has one constraint was violated")]
    ConstraintHasOne,

    /// Account data shorter than a discriminator.
    #[error("No 8 byte discriminator was found on the account")]
    AccountDiscriminatorNotFound,

    /// Account holds a different type than expected.
    #[error("8 byte discriminator did not match what was expected")]
    AccountDiscriminatorMismatch,

    /// Account data could not be decoded.
    #[error("Failed to deserialize the account")]
    AccountDidNotDeserialize,

    /// Account data could not be encoded.
    #[error("Failed to serialize the account")]
    AccountDidNotSerialize,

    /// Fewer accounts than the instruction requires.
    #[error("Not enough account keys given to the instruction")]
    AccountNotEnoughKeys,

    /// A writable account was passed read-only.
    #[error("The given account is not mutable")]
    AccountNotMutable,

    /// Account is owned by another program.
    #[error("The given account is owned by a different program than expected")]
    AccountOwnedByWrongProgram,

    /// A program account slot holds the wrong program.
    #[error("Program ID was not as expected")]
    InvalidProgramId,

    /// A required signer did not sign.
    #[error("The given account did not sign")]
    AccountNotSigner,

    /// A sysvar slot holds the wrong key.
    #[error("The given public key does not match the required sysvar")]
    AccountSysvarMismatch,

    /// Account must exist but does not.
    #[error("The program expected this account to be already initialized")]
    AccountNotInitialized,

    /// Account must be fresh but already exists.
    #[error("Allocate: account {0} already in use")]
    AccountAlreadyInUse(Pubkey),

    /// Token account does not belong to the mint.
    #[error("Account not associated with this Mint")]
    TokenMintMismatch,

    /// Token authority did not match.
    #[error("Owner does not match")]
    TokenOwnerMismatch,

    /// Token arithmetic overflowed.
    #[error("Operation overflowed")]
    TokenOverflow,

    /// Program-defined error.
    #[error(transparent)]
    Project(#[from] ProjectError),
}

impl ProgramError {
    /// Numeric code reported to clients as `{"Custom": code}`.
    pub fn code(&self) -> u32 {
        match self {
            Self::AccountAlreadyInUse(_) => 0,
            Self::TokenMintMismatch => 3,
            Self::TokenOwnerMismatch => 4,
            Self::TokenOverflow => 14,
            Self::InstructionMissing => 100,
            Self::InstructionFallbackNotFound => 101,
            Self::InstructionDidNotDeserialize => 102,
            Self::InstructionDidNotSerialize => 103,
            Self::ConstraintHasOne => 2001,
            Self::AccountDiscriminatorNotFound => 3001,
            Self::AccountDiscriminatorMismatch => 3002,
            Self::AccountDidNotDeserialize => 3003,
            Self::AccountDidNotSerialize => 3004,
            Self::AccountNotEnoughKeys => 3005,
            Self::AccountNotMutable => 3006,
            Self::AccountOwnedByWrongProgram => 3007,
            Self::InvalidProgramId => 3008,
            Self::AccountNotSigner => 3010,
            Self::AccountNotInitialized => 3012,
            Self::AccountSysvarMismatch => 3015,
            Self::Project(e) => e.code(),
        }
    }

    /// Short name used in program logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InstructionMissing => "InstructionMissing",
            Self::InstructionFallbackNotFound => "InstructionFallbackNotFound",
            Self::InstructionDidNotDeserialize => "InstructionDidNotDeserialize",
            Self::InstructionDidNotSerialize => "InstructionDidNotSerialize",
            Self::ConstraintHasOne => "ConstraintHasOne",
            Self::AccountDiscriminatorNotFound => "AccountDiscriminatorNotFound",
            Self::AccountDiscriminatorMismatch => "AccountDiscriminatorMismatch",
            Self::AccountDidNotDeserialize => "AccountDidNotDeserialize",
            Self::AccountDidNotSerialize => "AccountDidNotSerialize",
            Self::AccountNotEnoughKeys => "AccountNotEnoughKeys",
            Self::AccountNotMutable => "AccountNotMutable",
            Self::AccountOwnedByWrongProgram => "AccountOwnedByWrongProgram",
            Self::InvalidProgramId => "InvalidProgramId",
            Self::AccountNotSigner => "AccountNotSigner",
            Self::AccountSysvarMismatch => "AccountSysvarMismatch",
            Self::AccountNotInitialized => "AccountNotInitialized",
            Self::AccountAlreadyInUse(_) => "AccountAlreadyInUse",
            Self::TokenMintMismatch => "TokenMintMismatch",
            Self::TokenOwnerMismatch => "TokenOwnerMismatch",
            Self::TokenOverflow => "TokenOverflow",
            Self::Project(e) => e.name(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
