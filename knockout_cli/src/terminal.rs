//! Terminal presentation surface.
//!
//! Renders presentation requests as text and turns the user's Enter key
//! into the acknowledgment or advance event the bracket is waiting for.

use knockout::bracket::{BracketEvent, PresentationRequest, Stage};

/// Human-readable stage name
fn stage_title(stage: Stage) -> &'static str {
    match stage {
        Stage::Sf1 => "Semifinal 1",
        Stage::Sf2 => "Semifinal 2",
        Stage::Final => "Final",
    }
}

/// Render a request for the terminal
pub fn render(request: &PresentationRequest) -> String {
    match request {
        PresentationRequest::Announce {
            stage,
            entrant_a,
            entrant_b,
        } => format!(
            "=== {} ===\n{} vs {}",
            stage_title(*stage),
            entrant_a.name,
            entrant_b.name
        ),
        PresentationRequest::MatchResult { winner_name } => format!("{winner_name} wins!"),
        PresentationRequest::Champion { winner_name } => {
            format!("*** {winner_name} is the champion! ***")
        }
    }
}

/// Prompt shown while waiting for the user, with the event Enter sends
pub fn reply(request: &PresentationRequest) -> Option<(&'static str, BracketEvent)> {
    match request {
        PresentationRequest::Announce { .. } => {
            Some(("Press Enter to start the match", BracketEvent::Acknowledged))
        }
        PresentationRequest::MatchResult { .. } => {
            Some(("Press Enter to continue", BracketEvent::AdvanceRequested))
        }
        PresentationRequest::Champion { .. } => None,
    }
}
