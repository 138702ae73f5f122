//! Bracket data models for the four-entrant knockout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of entrants in a bracket
pub const BRACKET_SIZE: usize = 4;

/// Number of matches played in a bracket
pub const MATCH_COUNT: usize = 3;

/// Opaque entrant identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntrantId(Uuid);

impl EntrantId {
    /// Generate a fresh random identity
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EntrantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant placed into a match slot.
///
/// The engine compares entrants by [`EntrantId`] and only ever reads the
/// display name, when handing it to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
}

impl Entrant {
    /// Register an entrant under a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntrantId::new(),
            name: name.into(),
        }
    }

    /// Create an entrant with a known identity
    pub fn with_id(id: EntrantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One of the three bracket stages, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    Sf1,
    Sf2,
    Final,
}

impl Stage {
    /// All stages in play order
    pub const ALL: [Stage; MATCH_COUNT] = [Stage::Sf1, Stage::Sf2, Stage::Final];

    /// Position of this stage in the bracket (0-indexed)
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Stage::Sf1 => 0,
            Stage::Sf2 => 1,
            Stage::Final => 2,
        }
    }

    /// Stage at the given position, if any
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Stage::Sf1),
            1 => Some(Stage::Sf2),
            2 => Some(Stage::Final),
            _ => None,
        }
    }

    /// Stage played after this one
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Stage named by a presentation label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.label() == label)
    }

    /// Label handed to the presentation layer
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Stage::Sf1 => "SF1",
            Stage::Sf2 => "SF2",
            Stage::Final => "FINAL",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pairing and outcome record for one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSlot {
    pub stage: Stage,
    pub seat_a: Option<Entrant>,
    pub seat_b: Option<Entrant>,
    pub winner: Option<Entrant>,
}

impl MatchSlot {
    /// Slot with no seats filled yet
    #[must_use]
    pub const fn empty(stage: Stage) -> Self {
        Self {
            stage,
            seat_a: None,
            seat_b: None,
            winner: None,
        }
    }

    /// Slot with both seats filled
    #[must_use]
    pub fn seated(stage: Stage, seat_a: Entrant, seat_b: Entrant) -> Self {
        Self {
            stage,
            seat_a: Some(seat_a),
            seat_b: Some(seat_b),
            winner: None,
        }
    }

    /// Both seats, if the pairing is known
    #[must_use]
    pub fn pairing(&self) -> Option<(&Entrant, &Entrant)> {
        match (&self.seat_a, &self.seat_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Seated entrant with the given identity
    #[must_use]
    pub fn seat_for(&self, id: EntrantId) -> Option<&Entrant> {
        [&self.seat_a, &self.seat_b]
            .into_iter()
            .flatten()
            .find(|entrant| entrant.id == id)
    }

    /// Seated entrant that is not the given one
    #[must_use]
    pub fn opponent_of(&self, id: EntrantId) -> Option<&Entrant> {
        let (a, b) = self.pairing()?;
        if a.id == id {
            Some(b)
        } else if b.id == id {
            Some(a)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }
}

/// Complete bracket: three slots, the champion and the stage cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketState {
    pub slots: [MatchSlot; MATCH_COUNT],
    pub champion: Option<Entrant>,
    pub current_stage_index: usize,
}

impl BracketState {
    /// Seat the semifinals from the registered entrants.
    ///
    /// SF1 takes entrants 0 and 1, SF2 takes entrants 2 and 3; the final
    /// stays empty until both semifinals are decided.
    #[must_use]
    pub fn new(entrants: [Entrant; BRACKET_SIZE]) -> Self {
        let [a, b, c, d] = entrants;
        Self {
            slots: [
                MatchSlot::seated(Stage::Sf1, a, b),
                MatchSlot::seated(Stage::Sf2, c, d),
                MatchSlot::empty(Stage::Final),
            ],
            champion: None,
            current_stage_index: 0,
        }
    }

    #[must_use]
    pub fn slot(&self, stage: Stage) -> &MatchSlot {
        &self.slots[stage.index()]
    }

    pub(crate) fn slot_mut(&mut self, stage: Stage) -> &mut MatchSlot {
        &mut self.slots[stage.index()]
    }

    /// Stage the cursor points at
    #[must_use]
    pub fn current_stage(&self) -> Stage {
        Stage::from_index(self.current_stage_index).unwrap_or(Stage::Final)
    }

    /// Final pairing derived from the semifinal winners, once both exist
    #[must_use]
    pub fn final_pairing(&self) -> Option<(Entrant, Entrant)> {
        let sf1 = self.slot(Stage::Sf1).winner.clone()?;
        let sf2 = self.slot(Stage::Sf2).winner.clone()?;
        Some((sf1, sf2))
    }

    /// Whether the bracket has reached its terminal state
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.champion.is_some()
    }
}

/// Record of a decided match, kept in play order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub stage: Stage,
    pub winner: Entrant,
    pub loser: Entrant,
    pub completed_at: DateTime<Utc>,
}
