//! Events consumed by the bracket and the collaborator contracts it drives.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

use super::config::MatchConfig;
use super::models::{Entrant, EntrantId, Stage};

/// Events that move the bracket forward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketEvent {
    /// The announced pairing was acknowledged; the match may begin
    Acknowledged,
    /// The running match finished
    MatchCompleted { winner: EntrantId },
    /// The result screen was dismissed; move to the next stage
    AdvanceRequested,
}

impl BracketEvent {
    /// Event name used in logs and protocol violations
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Acknowledged => "Acknowledged",
            Self::MatchCompleted { .. } => "MatchCompleted",
            Self::AdvanceRequested => "AdvanceRequested",
        }
    }
}

impl fmt::Display for BracketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchCompleted { winner } => write!(f, "MatchCompleted({winner})"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Executes one match at a time.
///
/// After `run()` the runner must report exactly one
/// [`BracketEvent::MatchCompleted`] naming one of the two entrants passed to
/// `initialize()`.
pub trait MatchRunner {
    fn initialize(&mut self, entrant_a: Entrant, entrant_b: Entrant, config: MatchConfig);
    fn run(&mut self);
}

/// Renders bracket progress to the user.
///
/// `announce` is answered later with [`BracketEvent::Acknowledged`] and
/// `show_match_result` with [`BracketEvent::AdvanceRequested`].
pub trait Presentation {
    fn announce(&mut self, stage_label: &str, entrant_a: Entrant, entrant_b: Entrant);
    fn show_match_result(&mut self, winner_name: &str);
    fn show_champion(&mut self, winner_name: &str);
}

/// Presentation call as a value, for presentation layers living elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationRequest {
    Announce {
        stage: Stage,
        entrant_a: Entrant,
        entrant_b: Entrant,
    },
    MatchResult {
        winner_name: String,
    },
    Champion {
        winner_name: String,
    },
}

/// Presentation that forwards every request into a channel
#[derive(Debug, Clone)]
pub struct ChannelPresentation {
    sender: mpsc::UnboundedSender<PresentationRequest>,
}

impl ChannelPresentation {
    pub fn new(sender: mpsc::UnboundedSender<PresentationRequest>) -> Self {
        Self { sender }
    }

    /// Presentation plus the receiving end for the UI
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PresentationRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    fn forward(&self, request: PresentationRequest) {
        if self.sender.send(request).is_err() {
            log::warn!("Presentation channel closed, dropping request");
        }
    }
}

impl Presentation for ChannelPresentation {
    fn announce(&mut self, stage_label: &str, entrant_a: Entrant, entrant_b: Entrant) {
        let Some(stage) = Stage::from_label(stage_label) else {
            log::warn!("Unknown stage label {stage_label}, dropping announcement");
            return;
        };
        self.forward(PresentationRequest::Announce {
            stage,
            entrant_a,
            entrant_b,
        });
    }

    fn show_match_result(&mut self, winner_name: &str) {
        self.forward(PresentationRequest::MatchResult {
            winner_name: winner_name.to_string(),
        });
    }

    fn show_champion(&mut self, winner_name: &str) {
        self.forward(PresentationRequest::Champion {
            winner_name: winner_name.to_string(),
        });
    }
}
