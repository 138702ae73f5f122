//! Bracket actor message types.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use super::config::MatchConfig;
use super::errors::{ConfigurationError, ProtocolViolation};
use super::events::BracketEvent;
use super::models::{BracketState, Entrant, MatchRecord};
use super::state_machine::BracketPhase;

/// Messages that can be sent to a BracketActor
#[derive(Debug)]
pub enum BracketMessage {
    /// Seat the bracket and announce the first semifinal
    Start {
        entrants: Vec<Entrant>,
        config: MatchConfig,
        response: oneshot::Sender<Result<(), ConfigurationError>>,
    },

    /// Acknowledgment, match completion or advance request
    Event(BracketEvent),

    /// Get the current bracket
    GetSnapshot {
        response: oneshot::Sender<BracketSnapshot>,
    },

    /// Subscribe to bracket notifications
    Subscribe {
        sender: mpsc::Sender<BracketNotification>,
    },

    /// Stop the actor without finishing the bracket
    Shutdown,
}

/// Notification sent to subscribers after each handled event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketNotification {
    /// The bracket moved to a new phase
    PhaseChanged(BracketPhase),
    /// An event was dropped
    EventRejected(ProtocolViolation),
    /// The final was decided
    Completed { champion: Entrant },
}

/// Owned view of the bracket at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSnapshot {
    pub phase: BracketPhase,
    pub state: Option<BracketState>,
    pub history: Vec<MatchRecord>,
}

impl BracketSnapshot {
    /// Champion, if the bracket is complete
    pub fn champion(&self) -> Option<&Entrant> {
        self.state.as_ref()?.champion.as_ref()
    }
}
