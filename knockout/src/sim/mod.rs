//! Simulated matches for running a bracket without a real game engine.
//!
//! A [`SimulatedMatch`] plays rally after rally until one side reaches the
//! score limit. [`SimulatedMatchRunner`] wraps it as a [`MatchRunner`] that
//! reports the winner back to a bracket actor from a background task.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::bracket::{BracketHandle, Entrant, MatchConfig, MatchRunner};

/// Chance that a rally is played with a power-up active
const POWER_UP_CHANCE: f64 = 0.15;

/// Points awarded for a rally won under a power-up
const POWER_UP_POINTS: u8 = 2;

/// Final score of a simulated match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub winner: Entrant,
    pub loser: Entrant,
    pub winner_points: u8,
    pub loser_points: u8,
    pub rallies: u32,
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.winner, self.winner_points, self.loser_points, self.loser
        )
    }
}

/// One match between two entrants
#[derive(Debug, Clone)]
pub struct SimulatedMatch {
    entrant_a: Entrant,
    entrant_b: Entrant,
    config: MatchConfig,
}

impl SimulatedMatch {
    pub fn new(entrant_a: Entrant, entrant_b: Entrant, config: MatchConfig) -> Self {
        Self {
            entrant_a,
            entrant_b,
            config,
        }
    }

    /// Play rallies until one side reaches the score limit
    pub fn play<G: Rng>(self, rng: &mut G) -> MatchScore {
        let limit = self.config.score_limit.max(1);
        let (mut points_a, mut points_b) = (0u8, 0u8);
        let mut rallies = 0u32;

        while points_a < limit && points_b < limit {
            rallies += 1;
            let points = if self.config.power_ups && rng.random_bool(POWER_UP_CHANCE) {
                POWER_UP_POINTS
            } else {
                1
            };

            if rng.random_bool(0.5) {
                points_a = points_a.saturating_add(points).min(limit);
            } else {
                points_b = points_b.saturating_add(points).min(limit);
            }
        }

        if points_a >= limit {
            MatchScore {
                winner: self.entrant_a,
                loser: self.entrant_b,
                winner_points: points_a,
                loser_points: points_b,
                rallies,
            }
        } else {
            MatchScore {
                winner: self.entrant_b,
                loser: self.entrant_a,
                winner_points: points_b,
                loser_points: points_a,
                rallies,
            }
        }
    }
}

/// Match runner that simulates each match and reports to a bracket actor
pub struct SimulatedMatchRunner {
    handle: BracketHandle,
    rng: StdRng,
    rally_delay: Duration,
    pending: Option<SimulatedMatch>,
    scores: Vec<MatchScore>,
}

impl SimulatedMatchRunner {
    /// Runner with an entropy-seeded RNG
    pub fn new(handle: BracketHandle) -> Self {
        Self::with_rng(handle, StdRng::from_os_rng())
    }

    /// Runner with a fixed seed, for reproducible brackets
    pub fn seeded(handle: BracketHandle, seed: u64) -> Self {
        Self::with_rng(handle, StdRng::seed_from_u64(seed))
    }

    fn with_rng(handle: BracketHandle, rng: StdRng) -> Self {
        Self {
            handle,
            rng,
            rally_delay: Duration::ZERO,
            pending: None,
            scores: Vec::new(),
        }
    }

    /// Wait this long per rally before reporting the result
    pub fn with_rally_delay(mut self, rally_delay: Duration) -> Self {
        self.rally_delay = rally_delay;
        self
    }

    /// Scores of every match run so far
    pub fn scores(&self) -> &[MatchScore] {
        &self.scores
    }
}

impl MatchRunner for SimulatedMatchRunner {
    fn initialize(&mut self, entrant_a: Entrant, entrant_b: Entrant, config: MatchConfig) {
        self.pending = Some(SimulatedMatch::new(entrant_a, entrant_b, config));
    }

    fn run(&mut self) {
        let Some(simulated) = self.pending.take() else {
            log::warn!("Match run requested before initialization");
            return;
        };

        let score = simulated.play(&mut self.rng);
        log::info!("Simulated match finished: {score} after {} rallies", score.rallies);

        let winner = score.winner.id;
        let delay = self.rally_delay * score.rallies;
        self.scores.push(score);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::error!("Simulated match runner needs a tokio runtime to report results");
            return;
        };

        let handle = self.handle.clone();
        runtime.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if let Err(e) = handle.complete_match(winner).await {
                log::error!("Failed to report match result: {e}");
            }
        });
    }
}
