//! # Knockout
//!
//! A four-entrant single-elimination bracket engine built as an explicit
//! finite state machine.
//!
//! The bracket plays three matches in a fixed order: semifinal 1, semifinal
//! 2 and the final between the two semifinal winners. Each stage follows the
//! same protocol:
//!
//! - **Announcing**: the pairing is shown and the engine waits for an acknowledgment
//! - **MatchRunning**: the match runner plays the match and reports one winner
//! - **AwaitingAdvance**: the result is shown and the engine waits for an advance request
//!
//! After the final the champion is shown and the bracket becomes immutable.
//!
//! ## Core Modules
//!
//! - [`bracket`]: Bracket models, state machine, manager and async actor
//! - [`sim`]: Simulated matches for running a bracket without a game engine
//!
//! ## Example
//!
//! ```
//! use knockout::{BracketPhase, Entrant, MatchConfig};
//!
//! let entrants: Vec<Entrant> = ["A", "B", "C", "D"].into_iter().map(Entrant::new).collect();
//! assert_eq!(entrants.len(), knockout::BRACKET_SIZE);
//! assert!(MatchConfig::new(5).validate().is_ok());
//! assert_eq!(BracketPhase::default().to_string(), "Idle");
//! ```

/// Bracket engine and hosting.
pub mod bracket;
pub use bracket::{
    BRACKET_SIZE, BracketActor, BracketEvent, BracketHandle, BracketManager, BracketPhase,
    BracketSetup, BracketSnapshot, BracketState, ConfigurationError, Entrant, EntrantId,
    MatchConfig, MatchRunner, Presentation, PresentationRequest, ProtocolViolation, Stage,
};

/// Simulated match execution.
pub mod sim;
pub use sim::{MatchScore, SimulatedMatch, SimulatedMatchRunner};
