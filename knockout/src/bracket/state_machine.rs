//! Bracket phase definitions.
//!
//! Each phase struct is one point in the bracket lifecycle; [`BracketPhase`]
//! wraps them for dispatch through [`PhaseInfo`].

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::models::Stage;

/// Read-only queries every phase answers
#[enum_dispatch]
pub trait PhaseInfo {
    /// Phase name used in logs and protocol violations
    fn name(&self) -> &'static str;

    /// Stage the phase refers to, if any
    fn stage(&self) -> Option<Stage>;

    /// Whether the bracket can no longer change
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Bracket created, not yet started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idle;

/// Pairing announced, waiting for the acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcing {
    pub stage: Stage,
}

/// Match handed to the runner, waiting for its completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRunning {
    pub stage: Stage,
}

/// Result shown, waiting for the advance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitingAdvance {
    pub stage: Stage,
}

/// Champion decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complete;

impl PhaseInfo for Idle {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn stage(&self) -> Option<Stage> {
        None
    }
}

impl PhaseInfo for Announcing {
    fn name(&self) -> &'static str {
        "Announcing"
    }

    fn stage(&self) -> Option<Stage> {
        Some(self.stage)
    }
}

impl PhaseInfo for MatchRunning {
    fn name(&self) -> &'static str {
        "MatchRunning"
    }

    fn stage(&self) -> Option<Stage> {
        Some(self.stage)
    }
}

impl PhaseInfo for AwaitingAdvance {
    fn name(&self) -> &'static str {
        "AwaitingAdvance"
    }

    fn stage(&self) -> Option<Stage> {
        Some(self.stage)
    }
}

impl PhaseInfo for Complete {
    fn name(&self) -> &'static str {
        "Complete"
    }

    fn stage(&self) -> Option<Stage> {
        None
    }

    fn is_terminal(&self) -> bool {
        true
    }
}

/// Where the bracket is in its lifecycle.
///
/// `Idle → Announcing(SF1) → MatchRunning(SF1) → AwaitingAdvance(SF1) →
/// Announcing(SF2) → … → MatchRunning(FINAL) → Complete`
#[enum_dispatch(PhaseInfo)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketPhase {
    Idle(Idle),
    Announcing(Announcing),
    MatchRunning(MatchRunning),
    AwaitingAdvance(AwaitingAdvance),
    Complete(Complete),
}

impl Default for BracketPhase {
    fn default() -> Self {
        Idle.into()
    }
}

impl std::fmt::Display for BracketPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage() {
            Some(stage) => write!(f, "{}({stage})", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}
