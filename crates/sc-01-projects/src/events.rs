//! # Event Schema
//!
//! Events emitted by the program. Each event is written to the transaction
//! logs as `Program data: <hex>` where the payload is the event discriminator
//! followed by the bincode body.

use crate::domain::entities::{ExecutionLog, ProjectState};
use crate::errors::ProgramError;
use serde::{Deserialize, Serialize};
use shared_types::{Discriminator, Pubkey};

/// Prefix of every event log line.
pub const EVENT_LOG_PREFIX: &str = "Program data: ";

/// An event type with a discriminator-prefixed binary layout.
pub trait Event: Serialize {
    /// `sha256("event:<Name>")[..8]`.
    const DISCRIMINATOR: Discriminator;
    /// Event name as published in the IDL.
    const NAME: &'static str;

    /// Discriminator followed by the bincode body.
    fn data(&self) -> Result<Vec<u8>, ProgramError> {
        let body = bincode::serialize(self).map_err(|_| ProgramError::AccountDidNotSerialize)?;
        let mut out = Self::DISCRIMINATOR.to_vec();
        out.extend_from_slice(&body);
        Ok(out)
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// A project was registered and its allocation minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub project_id: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub total_allocation: u64,
}

impl Event for ProjectCreated {
    const DISCRIMINATOR: Discriminator = [192, 10, 163, 29, 185, 31, 67, 168];
    const NAME: &'static str = "ProjectCreated";
}

/// A project moved to a new lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStateUpdated {
    pub project_id: Pubkey,
    pub new_state: ProjectState,
}

impl Event for ProjectStateUpdated {
    const DISCRIMINATOR: Discriminator = [37, 202, 148, 7, 227, 65, 223, 244];
    const NAME: &'static str = "ProjectStateUpdated";
}

/// Any event this program emits, as reported by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "data")]
pub enum ProgramEvent {
    ProjectCreated(ProjectCreated),
    ProjectStateUpdated(ProjectStateUpdated),
}

// =============================================================================
// EMIT / DECODE
// =============================================================================

/// Writes `event` to the log.
pub fn emit<E: Event>(logs: &mut ExecutionLog, event: &E) -> Result<(), ProgramError> {
    let data = event.data()?;
    logs.push(format!("{EVENT_LOG_PREFIX}{}", hex::encode(data)));
    Ok(())
}

/// Decodes an event from a log line. Returns None for any other line.
pub fn decode_event_log(line: &str) -> Option<ProgramEvent> {
    let payload = line.strip_prefix(EVENT_LOG_PREFIX)?;
    let bytes = hex::decode(payload).ok()?;
    let (tag, body) = bytes.split_at_checked(8)?;
    if tag == ProjectCreated::DISCRIMINATOR {
        bincode::deserialize(body)
            .ok()
            .map(ProgramEvent::ProjectCreated)
    } else if tag == ProjectStateUpdated::DISCRIMINATOR {
        bincode::deserialize(body)
            .ok()
            .map(ProgramEvent::ProjectStateUpdated)
    } else {
        None
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::discriminator;

    #[test]
    fn test_event_discriminators() {
        assert_eq!(
            ProjectCreated::DISCRIMINATOR,
            discriminator("event", ProjectCreated::NAME)
        );
        assert_eq!(
            ProjectStateUpdated::DISCRIMINATOR,
            discriminator("event", ProjectStateUpdated::NAME)
        );
    }

    #[test]
    fn test_emit_then_decode() {
        let event = ProjectStateUpdated {
            project_id: Pubkey::new([5; 32]),
            new_state: ProjectState::Completed,
        };
        let mut logs = ExecutionLog::new();
        emit(&mut logs, &event).unwrap();

        let line = &logs.lines()[0];
        assert!(line.starts_with(EVENT_LOG_PREFIX));
        assert_eq!(
            decode_event_log(line),
            Some(ProgramEvent::ProjectStateUpdated(event))
        );
    }

    #[test]
    fn test_decode_ignores_other_lines() {
        assert_eq!(decode_event_log("Program log: Instruction: Initialize"), None);
        assert_eq!(decode_event_log("Program data: zz"), None);
        assert_eq!(decode_event_log("Program data: 0102"), None);
    }

    #[test]
    fn test_event_json_shape() {
        let event = ProgramEvent::ProjectCreated(ProjectCreated {
            project_id: Pubkey::new([1; 32]),
            creator: Pubkey::new([2; 32]),
            name: "alpha".into(),
            total_allocation: 10,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["name"], "ProjectCreated");
        assert_eq!(json["data"]["total_allocation"], 10);
    }
}
