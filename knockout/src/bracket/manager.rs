//! Bracket manager driving the knockout from the first announcement to the champion.

use chrono::Utc;
use log::{debug, info, warn};
use std::collections::HashSet;

use super::config::MatchConfig;
use super::errors::{ConfigurationError, ProtocolResult, ProtocolViolation};
use super::events::{BracketEvent, MatchRunner, Presentation};
use super::models::{BRACKET_SIZE, BracketState, Entrant, EntrantId, MatchRecord, Stage};
use super::state_machine::{
    Announcing, AwaitingAdvance, BracketPhase, Complete, MatchRunning, PhaseInfo,
};

/// Owns a bracket and moves it through its phases.
///
/// Every mutation happens inside one of the event handlers, each of which
/// runs to completion. Collaborators only ever receive owned copies of the
/// entrants and labels they need.
#[derive(Debug)]
pub struct BracketManager<R, P> {
    state: Option<BracketState>,
    phase: BracketPhase,
    config: MatchConfig,
    history: Vec<MatchRecord>,
    runner: R,
    presentation: P,
}

impl<R: MatchRunner, P: Presentation> BracketManager<R, P> {
    /// Create an idle manager around its collaborators
    pub fn new(runner: R, presentation: P) -> Self {
        Self {
            state: None,
            phase: BracketPhase::default(),
            config: MatchConfig::default(),
            history: Vec::with_capacity(Stage::ALL.len()),
            runner,
            presentation,
        }
    }

    /// Seat the bracket and announce the first semifinal.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the manager already started, the
    /// entrants are not exactly four distinct identities, or the score limit
    /// is out of range. No collaborator is called in that case.
    pub fn start(
        &mut self,
        entrants: Vec<Entrant>,
        config: MatchConfig,
    ) -> Result<(), ConfigurationError> {
        if self.state.is_some() {
            return Err(ConfigurationError::AlreadyStarted);
        }

        let entrants: [Entrant; BRACKET_SIZE] = entrants.try_into().map_err(
            |rejected: Vec<Entrant>| ConfigurationError::EntrantCount {
                expected: BRACKET_SIZE,
                got: rejected.len(),
            },
        )?;

        let mut seen = HashSet::with_capacity(BRACKET_SIZE);
        if let Some(duplicate) = entrants.iter().find(|entrant| !seen.insert(entrant.id)) {
            return Err(ConfigurationError::DuplicateEntrant(duplicate.id));
        }

        config.validate()?;

        info!(
            "Starting bracket: {} vs {}, {} vs {} (first to {})",
            entrants[0], entrants[1], entrants[2], entrants[3], config.score_limit
        );

        self.config = config;
        self.state = Some(BracketState::new(entrants));
        self.announce(Stage::Sf1);

        Ok(())
    }

    /// Route an event to its handler
    pub fn handle(&mut self, event: BracketEvent) -> ProtocolResult<BracketPhase> {
        match event {
            BracketEvent::Acknowledged => self.on_announcement_acknowledged(),
            BracketEvent::MatchCompleted { winner } => self.on_match_complete(winner),
            BracketEvent::AdvanceRequested => self.on_advance_requested(),
        }
    }

    /// Start the announced match
    pub fn on_announcement_acknowledged(&mut self) -> ProtocolResult<BracketPhase> {
        let BracketPhase::Announcing(Announcing { stage }) = self.phase else {
            return Err(self.reject("Acknowledged"));
        };

        let Some((seat_a, seat_b)) = self.pairing(stage) else {
            return Err(self.reject("Acknowledged"));
        };

        self.enter(MatchRunning { stage }.into());
        debug!("Running {stage}: {seat_a} vs {seat_b}");
        self.runner.initialize(seat_a, seat_b, self.config);
        self.runner.run();

        Ok(self.phase)
    }

    /// Record the winner of the running match.
    ///
    /// The winner must be seated in the running match; anything else is
    /// dropped without touching the bracket.
    pub fn on_match_complete(&mut self, winner: EntrantId) -> ProtocolResult<BracketPhase> {
        let BracketPhase::MatchRunning(MatchRunning { stage }) = self.phase else {
            return Err(self.reject("MatchCompleted"));
        };

        let Some(state) = self.state.as_mut() else {
            return Err(self.reject("MatchCompleted"));
        };

        let slot = state.slot_mut(stage);
        let (Some(winner), Some(loser)) = (
            slot.seat_for(winner).cloned(),
            slot.opponent_of(winner).cloned(),
        ) else {
            let violation = ProtocolViolation::WinnerNotSeated { stage, winner };
            warn!("Ignoring match result: {violation}");
            return Err(violation);
        };
        slot.winner = Some(winner.clone());

        info!("{stage} won by {winner} over {loser}");
        self.history.push(MatchRecord {
            stage,
            winner: winner.clone(),
            loser,
            completed_at: Utc::now(),
        });

        if stage == Stage::Final {
            state.champion = Some(winner.clone());
            self.enter(Complete.into());
            info!("Champion: {winner}");
            self.presentation.show_champion(&winner.name);
        } else {
            self.enter(AwaitingAdvance { stage }.into());
            self.presentation.show_match_result(&winner.name);
        }

        Ok(self.phase)
    }

    /// Move past a decided semifinal and announce the next stage
    pub fn on_advance_requested(&mut self) -> ProtocolResult<BracketPhase> {
        let BracketPhase::AwaitingAdvance(AwaitingAdvance { stage }) = self.phase else {
            return Err(self.reject("AdvanceRequested"));
        };

        let Some(next) = stage.next() else {
            return Err(self.reject("AdvanceRequested"));
        };
        let Some(state) = self.state.as_mut() else {
            return Err(self.reject("AdvanceRequested"));
        };

        state.current_stage_index = next.index();

        if next == Stage::Final {
            let pairing = state.final_pairing();
            debug_assert!(pairing.is_some(), "final seated before both semifinals");
            if let Some((seat_a, seat_b)) = pairing {
                let final_slot = state.slot_mut(Stage::Final);
                final_slot.seat_a = Some(seat_a);
                final_slot.seat_b = Some(seat_b);
            }
        }

        self.announce(next);

        Ok(self.phase)
    }

    /// Current phase
    pub fn phase(&self) -> BracketPhase {
        self.phase
    }

    /// Bracket state, once started
    pub fn state(&self) -> Option<&BracketState> {
        self.state.as_ref()
    }

    /// Owned copy of the bracket state
    pub fn snapshot(&self) -> Option<BracketState> {
        self.state.clone()
    }

    /// Match configuration in effect
    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Champion, once the final is decided
    pub fn champion(&self) -> Option<&Entrant> {
        self.state.as_ref()?.champion.as_ref()
    }

    /// Decided matches in play order
    pub fn history(&self) -> &[MatchRecord] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Tear the manager down, keeping the final bracket state
    pub fn into_state(self) -> Option<BracketState> {
        self.state
    }

    fn announce(&mut self, stage: Stage) {
        let Some((seat_a, seat_b)) = self.pairing(stage) else {
            warn!("Cannot announce {stage}: seats not filled");
            return;
        };

        self.enter(Announcing { stage }.into());
        self.presentation.announce(stage.label(), seat_a, seat_b);
    }

    fn pairing(&self, stage: Stage) -> Option<(Entrant, Entrant)> {
        let (a, b) = self.state.as_ref()?.slot(stage).pairing()?;
        Some((a.clone(), b.clone()))
    }

    fn enter(&mut self, phase: BracketPhase) {
        debug!("Bracket phase {} -> {phase}", self.phase);
        self.phase = phase;
    }

    fn reject(&self, event: &'static str) -> ProtocolViolation {
        let violation = ProtocolViolation::UnexpectedEvent {
            event,
            phase: self.phase.name(),
        };
        warn!("Ignoring event: {violation}");
        violation
    }
}
