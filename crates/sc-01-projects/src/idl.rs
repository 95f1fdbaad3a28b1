//! # Interface Descriptor
//!
//! The IDL the program publishes. The local cluster writes it to
//! `target/idl/supercollab.json` and clients resolve the program through it.

use crate::domain::entities::{Mint, ProgramAccount, Project, ProjectState, TokenAccount};
use crate::errors::ProjectError;
use crate::events::{Event, ProjectCreated, ProjectStateUpdated};
use crate::ids::{PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::instructions::ProjectInstruction;
use crate::{PROGRAM_NAME, VERSION};
use shared_types::{
    Idl, IdlAccount, IdlDefined, IdlEnumVariant, IdlErrorCode, IdlEvent, IdlField,
    IdlInstruction, IdlInstructionAccount, IdlMetadata, IdlType, IdlTypeDef, IdlTypeDefTy, Pubkey,
};

/// Builds the program's IDL.
pub fn idl() -> Idl {
    Idl {
        address: PROGRAM_ID,
        metadata: IdlMetadata {
            name: PROGRAM_NAME.to_string(),
            version: VERSION.to_string(),
        },
        instructions: vec![
            IdlInstruction {
                name: "initialize".into(),
                discriminator: ProjectInstruction::INITIALIZE,
                accounts: vec![],
                args: vec![],
            },
            IdlInstruction {
                name: "create_project".into(),
                discriminator: ProjectInstruction::CREATE_PROJECT,
                accounts: vec![
                    account("project", true, true),
                    account("creator", true, true),
                    account("token_mint", true, true),
                    account("project_vault", true, true),
                    fixed("system_program", SYSTEM_PROGRAM_ID),
                    fixed("token_program", TOKEN_PROGRAM_ID),
                    fixed("rent", RENT_SYSVAR_ID),
                ],
                args: vec![
                    field("name", IdlType::String),
                    field("description", IdlType::String),
                    field("total_allocation", IdlType::U64),
                ],
            },
            IdlInstruction {
                name: "update_project_state".into(),
                discriminator: ProjectInstruction::UPDATE_PROJECT_STATE,
                accounts: vec![
                    account("project", true, false),
                    account("creator", false, true),
                ],
                args: vec![field("new_state", defined("ProjectState"))],
            },
        ],
        accounts: vec![
            IdlAccount {
                name: "Project".into(),
                discriminator: Project::DISCRIMINATOR,
            },
            IdlAccount {
                name: "Mint".into(),
                discriminator: Mint::DISCRIMINATOR,
            },
            IdlAccount {
                name: "TokenAccount".into(),
                discriminator: TokenAccount::DISCRIMINATOR,
            },
        ],
        events: vec![
            IdlEvent {
                name: ProjectCreated::NAME.into(),
                discriminator: ProjectCreated::DISCRIMINATOR,
            },
            IdlEvent {
                name: ProjectStateUpdated::NAME.into(),
                discriminator: ProjectStateUpdated::DISCRIMINATOR,
            },
        ],
        errors: ProjectError::ALL
            .iter()
            .map(|e| IdlErrorCode {
                code: e.code(),
                name: e.name().into(),
                msg: Some(e.to_string()),
            })
            .collect(),
        types: type_defs(),
    }
}

fn type_defs() -> Vec<IdlTypeDef> {
    vec![
        IdlTypeDef {
            name: "ProjectState".into(),
            ty: IdlTypeDefTy::Enum {
                variants: ProjectState::ALL
                    .iter()
                    .map(|s| IdlEnumVariant {
                        name: s.name().into(),
                    })
                    .collect(),
            },
        },
        IdlTypeDef {
            name: "Project".into(),
            ty: IdlTypeDefTy::Struct {
                fields: vec![
                    field("id", IdlType::Pubkey),
                    field("name", IdlType::String),
                    field("description", IdlType::String),
                    field("state", defined("ProjectState")),
                    field("token_mint", IdlType::Pubkey),
                    field("creator", IdlType::Pubkey),
                    field("total_allocation", IdlType::U64),
                    field("created_at", IdlType::I64),
                ],
            },
        },
        IdlTypeDef {
            name: ProjectCreated::NAME.into(),
            ty: IdlTypeDefTy::Struct {
                fields: vec![
                    field("project_id", IdlType::Pubkey),
                    field("creator", IdlType::Pubkey),
                    field("name", IdlType::String),
                    field("total_allocation", IdlType::U64),
                ],
            },
        },
        IdlTypeDef {
            name: ProjectStateUpdated::NAME.into(),
            ty: IdlTypeDefTy::Struct {
                fields: vec![
                    field("project_id", IdlType::Pubkey),
                    field("new_state", defined("ProjectState")),
                ],
            },
        },
    ]
}

fn account(name: &str, writable: bool, signer: bool) -> IdlInstructionAccount {
    IdlInstructionAccount {
        name: name.into(),
        writable,
        signer,
        address: None,
    }
}

fn fixed(name: &str, address: Pubkey) -> IdlInstructionAccount {
    IdlInstructionAccount {
        name: name.into(),
        writable: false,
        signer: false,
        address: Some(address),
    }
}

fn field(name: &str, ty: IdlType) -> IdlField {
    IdlField {
        name: name.into(),
        ty,
    }
}

fn defined(name: &str) -> IdlType {
    IdlType::Defined(IdlDefined { name: name.into() })
}
