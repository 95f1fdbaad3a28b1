//! # SC-01 Projects - Project Registry Program
//!
//! **Program name:** `supercollab`
//! **Status:** Deployed on the local test cluster (`sc-02-localnet`)
//!
//! ## Purpose
//!
//! Registers collaborative projects, mints each project's token allocation into
//! a vault owned by the project, and tracks the project's lifecycle state.
//!
//! ## Instructions
//!
//! | Instruction | Accounts | Args |
//! |-------------|----------|------|
//! | `initialize` | none | none |
//! | `create_project` | project, creator, token_mint, project_vault, system_program, token_program, rent | name, description, total_allocation |
//! | `update_project_state` | project, creator | new_state |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Failed instructions change no accounts | `adapters/in_memory.rs` - `StagedAccounts` |
//! | Project data fills exactly its allocated space | `domain/invariants.rs` - `check_space_invariant()` |
//! | A state update always changes the state | `domain/invariants.rs` - `check_state_transition()` |
//! | Only the creator may update a project | `processor.rs` - `has_one = creator` check |
//!
//! ## Usage Example
//!
//! ```ignore
//! use sc_01_projects::prelude::*;
//!
//! let program = ProjectProgram::new();
//! let mut accounts = InMemoryAccounts::new();
//! let mut staged = StagedAccounts::new(&mut accounts);
//! let mut logs = ExecutionLog::new();
//! program.process(&ctx, &ix.data, &mut staged, &mut logs)?;
//! staged.commit();
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod idl;
pub mod instructions;
pub mod ports;
pub mod processor;
pub mod token;

// =============================================================================
// PROGRAM IDS
// =============================================================================

/// Well-known addresses referenced by the program.
pub mod ids {
    use shared_types::Pubkey;

    /// The supercollab program.
    pub const PROGRAM_ID: Pubkey = Pubkey::new([
        120, 16, 10, 206, 101, 178, 13, 252, 145, 223, 160, 169, 172, 106, 138, 85, 10, 119, 140,
        5, 69, 170, 47, 33, 108, 68, 158, 55, 38, 203, 29, 66,
    ]);

    /// The system program (account allocation).
    pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new([0u8; 32]);

    /// The token program (mints and token accounts).
    pub const TOKEN_PROGRAM_ID: Pubkey = Pubkey::new([
        6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133,
        237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
    ]);

    /// The rent sysvar.
    pub const RENT_SYSVAR_ID: Pubkey = Pubkey::new([
        6, 167, 213, 23, 25, 44, 92, 81, 33, 140, 201, 76, 61, 74, 241, 127, 88, 218, 238, 8, 155,
        161, 253, 68, 227, 219, 217, 138, 0, 0, 0, 0,
    ]);
}

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        Clock, ExecutionLog, Mint, ProgramAccount, Project, ProjectState, StoredAccount,
        TokenAccount,
    };
    pub use crate::domain::invariants::{check_space_invariant, check_state_transition};

    pub use crate::ports::inbound::{InvocationContext, ProgramApi};
    pub use crate::ports::outbound::AccountStore;

    pub use crate::adapters::{InMemoryAccounts, StagedAccounts};

    pub use crate::errors::{ProgramError, ProjectError};
    pub use crate::events::{decode_event_log, ProgramEvent, ProjectCreated, ProjectStateUpdated};
    pub use crate::instructions::{CreateProjectAccounts, ProjectInstruction};

    pub use crate::ids::{PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
    pub use crate::processor::ProjectProgram;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Program name, as published in the IDL.
pub const PROGRAM_NAME: &str = "supercollab";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name() {
        assert_eq!(PROGRAM_NAME, "supercollab");
    }

    #[test]
    fn test_ids_are_distinct() {
        use ids::*;
        let all = [PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID, RENT_SYSVAR_ID];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
