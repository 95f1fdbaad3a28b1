//! # Domain Invariants
//!
//! Checks that must hold for every committed project account.

use crate::domain::entities::{Project, ProjectState};
use crate::errors::{ProgramError, ProjectError};

/// A state update must move the project to a different state.
pub fn check_state_transition(
    current: ProjectState,
    requested: ProjectState,
) -> Result<(), ProjectError> {
    if current == requested {
        return Err(ProjectError::InvalidStateTransition);
    }
    Ok(())
}

/// Encoded project data must fill exactly the space allocated for it.
pub fn check_space_invariant(project: &Project, encoded: &[u8]) -> Result<(), ProgramError> {
    if encoded.len() != Project::space(&project.name, &project.description) {
        return Err(ProgramError::AccountDidNotSerialize);
    }
    Ok(())
}
