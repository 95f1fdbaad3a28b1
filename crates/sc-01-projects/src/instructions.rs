//! # Instructions
//!
//! Decoding of instruction data and builders for callers that construct
//! instructions directly instead of through an IDL.
//!
//! Data layout: `discriminator (8) ++ bincode(args)`.

use crate::domain::entities::ProjectState;
use crate::errors::ProgramError;
use crate::ids::{PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use serde::{Deserialize, Serialize};
use shared_types::{AccountMeta, Discriminator, Instruction, Pubkey};

/// Decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectInstruction {
    Initialize,
    CreateProject {
        name: String,
        description: String,
        total_allocation: u64,
    },
    UpdateProjectState {
        new_state: ProjectState,
    },
}

#[derive(Serialize, Deserialize)]
struct CreateProjectArgs {
    name: String,
    description: String,
    total_allocation: u64,
}

#[derive(Serialize, Deserialize)]
struct UpdateProjectStateArgs {
    new_state: ProjectState,
}

impl ProjectInstruction {
    /// `sha256("global:initialize")[..8]`
    pub const INITIALIZE: Discriminator = [175, 175, 109, 31, 13, 152, 155, 237];
    /// `sha256("global:create_project")[..8]`
    pub const CREATE_PROJECT: Discriminator = [148, 219, 181, 42, 221, 114, 145, 190];
    /// `sha256("global:update_project_state")[..8]`
    pub const UPDATE_PROJECT_STATE: Discriminator = [148, 58, 139, 203, 34, 17, 27, 232];

    /// Name used in the `Instruction: <Name>` log line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "Initialize",
            Self::CreateProject { .. } => "CreateProject",
            Self::UpdateProjectState { .. } => "UpdateProjectState",
        }
    }

    /// Decodes instruction data.
    pub fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        let (tag, args) = data
            .split_at_checked(8)
            .ok_or(ProgramError::InstructionMissing)?;

        if tag == Self::INITIALIZE {
            Ok(Self::Initialize)
        } else if tag == Self::CREATE_PROJECT {
            let a: CreateProjectArgs = decode_args(args)?;
            Ok(Self::CreateProject {
                name: a.name,
                description: a.description,
                total_allocation: a.total_allocation,
            })
        } else if tag == Self::UPDATE_PROJECT_STATE {
            let a: UpdateProjectStateArgs = decode_args(args)?;
            Ok(Self::UpdateProjectState {
                new_state: a.new_state,
            })
        } else {
            Err(ProgramError::InstructionFallbackNotFound)
        }
    }

    /// Encodes instruction data.
    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let (tag, args) = match self {
            Self::Initialize => (Self::INITIALIZE, Vec::new()),
            Self::CreateProject {
                name,
                description,
                total_allocation,
            } => (
                Self::CREATE_PROJECT,
                encode_args(&CreateProjectArgs {
                    name: name.clone(),
                    description: description.clone(),
                    total_allocation: *total_allocation,
                })?,
            ),
            Self::UpdateProjectState { new_state } => (
                Self::UPDATE_PROJECT_STATE,
                encode_args(&UpdateProjectStateArgs {
                    new_state: *new_state,
                })?,
            ),
        };
        let mut data = tag.to_vec();
        data.extend_from_slice(&args);
        Ok(data)
    }
}

fn decode_args<T: serde::de::DeserializeOwned>(args: &[u8]) -> Result<T, ProgramError> {
    bincode::deserialize(args).map_err(|_| ProgramError::InstructionDidNotDeserialize)
}

fn encode_args<T: Serialize>(args: &T) -> Result<Vec<u8>, ProgramError> {
    bincode::serialize(args).map_err(|_| ProgramError::InstructionDidNotSerialize)
}

// =============================================================================
// BUILDERS
// =============================================================================

/// Accounts for `create_project`.
#[derive(Debug, Clone, Copy)]
pub struct CreateProjectAccounts {
    pub project: Pubkey,
    pub creator: Pubkey,
    pub token_mint: Pubkey,
    pub project_vault: Pubkey,
}

/// Builds an `initialize` instruction.
pub fn initialize() -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![],
        data: ProjectInstruction::Initialize.pack()?,
    })
}

/// Builds a `create_project` instruction.
pub fn create_project(
    accounts: CreateProjectAccounts,
    name: &str,
    description: &str,
    total_allocation: u64,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(accounts.project, true),
            AccountMeta::new(accounts.creator, true),
            AccountMeta::new(accounts.token_mint, true),
            AccountMeta::new(accounts.project_vault, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        ],
        data: ProjectInstruction::CreateProject {
            name: name.to_string(),
            description: description.to_string(),
            total_allocation,
        }
        .pack()?,
    })
}

/// Builds an `update_project_state` instruction.
pub fn update_project_state(
    project: Pubkey,
    creator: Pubkey,
    new_state: ProjectState,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(project, false),
            AccountMeta::new_readonly(creator, true),
        ],
        data: ProjectInstruction::UpdateProjectState { new_state }.pack()?,
    })
}

// =============================================================================
// TESTS
// =============================================================================
