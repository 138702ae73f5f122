//! Bracket error types.

use super::models::{EntrantId, Stage};
use thiserror::Error;

/// Errors that prevent a bracket from starting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Wrong number of entrants
    #[error("Bracket needs exactly {expected} entrants, got {got}")]
    EntrantCount { expected: usize, got: usize },

    /// Same entrant registered twice
    #[error("Entrant {0} registered more than once")]
    DuplicateEntrant(EntrantId),

    /// Score limit outside the accepted range
    #[error("Score limit must be between {min} and {max}, got {got}")]
    ScoreLimitOutOfRange { min: u8, max: u8, got: u8 },

    /// `start()` called twice
    #[error("Bracket already started")]
    AlreadyStarted,
}

impl ConfigurationError {
    /// Get a client-safe error message that doesn't leak entrant identities
    pub fn client_message(&self) -> String {
        match self {
            ConfigurationError::DuplicateEntrant(_) => {
                "An entrant was registered more than once".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Events that arrived when the bracket could not accept them.
///
/// These are logged and dropped; the bracket state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// Event not valid in the current phase
    #[error("{event} received while {phase}")]
    UnexpectedEvent {
        event: &'static str,
        phase: &'static str,
    },

    /// Reported winner is not seated in the running match
    #[error("Winner {winner} is not seated in {stage}")]
    WinnerNotSeated { stage: Stage, winner: EntrantId },
}

/// Result type for bracket event handlers
pub type ProtocolResult<T> = Result<T, ProtocolViolation>;

/// Errors talking to a bracket actor
#[derive(Debug, Error)]
pub enum ActorError {
    /// The actor stopped and its mailbox is closed
    #[error("Bracket actor is closed")]
    Closed,

    /// The bracket refused to start
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
