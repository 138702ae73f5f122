//! Four-entrant single-elimination bracket.
//!
//! This module provides the bracket engine and its hosting:
//! - Bracket data models (entrants, slots, stages)
//! - Match configuration and on-disk setups
//! - The phase state machine and the manager that drives it
//! - Collaborator contracts for match execution and presentation
//! - An async actor serializing events from many sources
//!
//! ## Example
//!
//! ```
//! use knockout::bracket::{
//!     BracketEvent, BracketManager, ChannelPresentation, Entrant, MatchConfig, MatchRunner,
//!     PresentationRequest,
//! };
//!
//! struct NoopRunner;
//!
//! impl MatchRunner for NoopRunner {
//!     fn initialize(&mut self, _a: Entrant, _b: Entrant, _config: MatchConfig) {}
//!     fn run(&mut self) {}
//! }
//!
//! let (presentation, mut requests) = ChannelPresentation::channel();
//! let mut manager = BracketManager::new(NoopRunner, presentation);
//!
//! let entrants: Vec<Entrant> = ["A", "B", "C", "D"].into_iter().map(Entrant::new).collect();
//! manager.start(entrants.clone(), MatchConfig::new(5)).unwrap();
//! assert!(matches!(
//!     requests.try_recv().unwrap(),
//!     PresentationRequest::Announce { .. }
//! ));
//!
//! manager.handle(BracketEvent::Acknowledged).unwrap();
//! manager
//!     .handle(BracketEvent::MatchCompleted { winner: entrants[0].id })
//!     .unwrap();
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod events;
pub mod manager;
pub mod messages;
pub mod models;
pub mod state_machine;

pub use actor::{BracketActor, BracketHandle};
pub use config::{
    BracketSetup, DEFAULT_SCORE_LIMIT, MAX_SCORE_LIMIT, MIN_SCORE_LIMIT, MatchConfig,
};
pub use errors::{ActorError, ConfigurationError, ProtocolResult, ProtocolViolation};
pub use events::{
    BracketEvent, ChannelPresentation, MatchRunner, Presentation, PresentationRequest,
};
pub use manager::BracketManager;
pub use messages::{BracketMessage, BracketNotification, BracketSnapshot};
pub use models::{
    BRACKET_SIZE, BracketState, Entrant, EntrantId, MATCH_COUNT, MatchRecord, MatchSlot, Stage,
};
pub use state_machine::{
    Announcing, AwaitingAdvance, BracketPhase, Complete, Idle, MatchRunning, PhaseInfo,
};
