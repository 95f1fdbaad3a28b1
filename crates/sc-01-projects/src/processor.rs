//! # Project Program Processor
//!
//! Validates accounts and runs the handler for each instruction.
//!
//! Account checks run before any handler logic, in declaration order, so the
//! first failing constraint is the one reported.

use crate::domain::entities::{ExecutionLog, ProgramAccount, Project, ProjectState, StoredAccount};
use crate::domain::invariants::{check_space_invariant, check_state_transition};
use crate::errors::ProgramError;
use crate::events::{emit, ProjectCreated, ProjectStateUpdated};
use crate::ids::{PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::instructions::ProjectInstruction;
use crate::ports::inbound::{InvocationContext, ProgramApi};
use crate::ports::outbound::AccountStore;
use crate::token::{self, PROJECT_TOKEN_DECIMALS};
use shared_types::{AccountMeta, Pubkey};
use tracing::{debug, instrument};

/// The supercollab program.
#[derive(Debug, Clone, Copy)]
pub struct ProjectProgram {
    program_id: Pubkey,
}

impl Default for ProjectProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectProgram {
    /// The program at its canonical address.
    pub fn new() -> Self {
        Self {
            program_id: PROGRAM_ID,
        }
    }

    fn initialize(&self) -> Result<(), ProgramError> {
        debug!(program_id = %self.program_id, "initialize");
        Ok(())
    }

    fn create_project(
        &self,
        ctx: &InvocationContext<'_>,
        store: &mut dyn AccountStore,
        logs: &mut ExecutionLog,
        name: String,
        description: String,
        total_allocation: u64,
    ) -> Result<(), ProgramError> {
        // project: init, payer = creator
        let project_meta = ctx.account(0)?;
        require_signer(project_meta)?;
        require_writable(project_meta)?;
        require_uninitialized(store, project_meta)?;

        // creator: mut signer
        let creator_meta = ctx.account(1)?;
        require_signer(creator_meta)?;
        require_writable(creator_meta)?;

        // token_mint: init, mint::decimals = 9, mint::authority = creator
        let mint_meta = ctx.account(2)?;
        require_signer(mint_meta)?;
        require_writable(mint_meta)?;
        require_uninitialized(store, mint_meta)?;

        // project_vault: init, token::mint = token_mint, token::authority = project
        let vault_meta = ctx.account(3)?;
        require_signer(vault_meta)?;
        require_writable(vault_meta)?;
        require_uninitialized(store, vault_meta)?;

        require_program(ctx.account(4)?, &SYSTEM_PROGRAM_ID)?;
        require_program(ctx.account(5)?, &TOKEN_PROGRAM_ID)?;
        if ctx.account(6)?.pubkey != RENT_SYSVAR_ID {
            return Err(ProgramError::AccountSysvarMismatch);
        }

        let creator = creator_meta.pubkey;
        let project_key = project_meta.pubkey;
        let mint_key = mint_meta.pubkey;
        let vault_key = vault_meta.pubkey;

        token::initialize_mint(store, mint_key, PROJECT_TOKEN_DECIMALS, creator, Some(creator))?;
        token::initialize_account(store, vault_key, mint_key, project_key)?;

        let project = Project {
            id: project_key,
            name,
            description,
            state: ProjectState::Active,
            token_mint: mint_key,
            creator,
            total_allocation,
            created_at: ctx.clock.unix_timestamp,
        };
        let data = project.try_to_vec()?;
        check_space_invariant(&project, &data)?;
        store.put(
            project_key,
            StoredAccount {
                owner: self.program_id,
                data,
            },
        );

        token::mint_to(store, mint_key, vault_key, creator, total_allocation)?;

        emit(
            logs,
            &ProjectCreated {
                project_id: project.id,
                creator: project.creator,
                name: project.name.clone(),
                total_allocation: project.total_allocation,
            },
        )?;

        debug!(
            project = %project_key,
            creator = %creator,
            total_allocation,
            "project created"
        );
        Ok(())
    }

    fn update_project_state(
        &self,
        ctx: &InvocationContext<'_>,
        store: &mut dyn AccountStore,
        logs: &mut ExecutionLog,
        new_state: ProjectState,
    ) -> Result<(), ProgramError> {
        // project: mut, has_one = creator
        let project_meta = ctx.account(0)?;
        require_writable(project_meta)?;
        let mut project = self.load_project(store, &project_meta.pubkey)?;

        // creator: signer
        let creator_meta = ctx.account(1)?;
        require_signer(creator_meta)?;

        if project.creator != creator_meta.pubkey {
            return Err(ProgramError::ConstraintHasOne);
        }

        check_state_transition(project.state, new_state)?;
        project.state = new_state;

        store.put(
            project_meta.pubkey,
            StoredAccount::from_account(self.program_id, &project)?,
        );

        emit(
            logs,
            &ProjectStateUpdated {
                project_id: project.id,
                new_state,
            },
        )?;

        debug!(project = %project.id, state = new_state.name(), "project state updated");
        Ok(())
    }

    fn load_project(&self, store: &dyn AccountStore, key: &Pubkey) -> Result<Project, ProgramError> {
        let stored = store.get(key).ok_or(ProgramError::AccountNotInitialized)?;
        if stored.owner != self.program_id {
            return Err(ProgramError::AccountOwnedByWrongProgram);
        }
        stored.decode()
    }
}

impl ProgramApi for ProjectProgram {
    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    #[instrument(skip_all, fields(program_id = %self.program_id))]
    fn process(
        &self,
        ctx: &InvocationContext<'_>,
        data: &[u8],
        store: &mut dyn AccountStore,
        logs: &mut ExecutionLog,
    ) -> Result<(), ProgramError> {
        if ctx.program_id != self.program_id {
            return Err(ProgramError::InvalidProgramId);
        }

        let instruction = ProjectInstruction::unpack(data)?;
        logs.log(format!("Instruction: {}", instruction.name()));

        match instruction {
            ProjectInstruction::Initialize => self.initialize(),
            ProjectInstruction::CreateProject {
                name,
                description,
                total_allocation,
            } => self.create_project(ctx, store, logs, name, description, total_allocation),
            ProjectInstruction::UpdateProjectState { new_state } => {
                self.update_project_state(ctx, store, logs, new_state)
            }
        }
    }
}

// =============================================================================
// ACCOUNT CONSTRAINTS
// =============================================================================

fn require_signer(meta: &AccountMeta) -> Result<(), ProgramError> {
    if !meta.is_signer {
        return Err(ProgramError::AccountNotSigner);
    }
    Ok(())
}

fn require_writable(meta: &AccountMeta) -> Result<(), ProgramError> {
    if !meta.is_writable {
        return Err(ProgramError::AccountNotMutable);
    }
    Ok(())
}

fn require_uninitialized(store: &dyn AccountStore, meta: &AccountMeta) -> Result<(), ProgramError> {
    if store.contains(&meta.pubkey) {
        return Err(ProgramError::AccountAlreadyInUse(meta.pubkey));
    }
    Ok(())
}

fn require_program(meta: &AccountMeta, expected: &Pubkey) -> Result<(), ProgramError> {
    if meta.pubkey != *expected {
        return Err(ProgramError::InvalidProgramId);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
