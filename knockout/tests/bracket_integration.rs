//! Integration tests for bracket progression
//!
//! These tests drive a bracket from `start()` to the champion through the
//! public event API and check every collaborator call along the way.

use knockout::bracket::{
    BracketEvent, BracketManager, BracketPhase, ConfigurationError, Entrant, MatchConfig,
    MatchRunner, Presentation, ProtocolViolation, Stage,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Announce(String, String, String),
    Initialize(String, String, u8),
    Run,
    MatchResult(String),
    Champion(String),
}

#[derive(Debug, Default)]
struct Runner {
    calls: Vec<Call>,
}

impl MatchRunner for Runner {
    fn initialize(&mut self, entrant_a: Entrant, entrant_b: Entrant, config: MatchConfig) {
        self.calls.push(Call::Initialize(
            entrant_a.name,
            entrant_b.name,
            config.score_limit,
        ));
    }

    fn run(&mut self) {
        self.calls.push(Call::Run);
    }
}

#[derive(Debug, Default)]
struct Screen {
    calls: Vec<Call>,
}

impl Presentation for Screen {
    fn announce(&mut self, stage_label: &str, entrant_a: Entrant, entrant_b: Entrant) {
        self.calls.push(Call::Announce(
            stage_label.to_string(),
            entrant_a.name,
            entrant_b.name,
        ));
    }

    fn show_match_result(&mut self, winner_name: &str) {
        self.calls.push(Call::MatchResult(winner_name.to_string()));
    }

    fn show_champion(&mut self, winner_name: &str) {
        self.calls.push(Call::Champion(winner_name.to_string()));
    }
}

fn entrants(names: &[&str]) -> Vec<Entrant> {
    names.iter().copied().map(Entrant::new).collect()
}

fn manager() -> BracketManager<Runner, Screen> {
    BracketManager::new(Runner::default(), Screen::default())
}

fn announce(stage: &str, a: &str, b: &str) -> Call {
    Call::Announce(stage.to_string(), a.to_string(), b.to_string())
}

#[test]
fn test_end_to_end_bracket() {
    let players = entrants(&["A", "B", "C", "D"]);
    let (a, d) = (players[0].clone(), players[3].clone());
    let mut bracket = manager();

    bracket.start(players.clone(), MatchConfig::new(5)).unwrap();

    // SF1: A beats B
    bracket.on_announcement_acknowledged().unwrap();
    bracket.on_match_complete(a.id).unwrap();
    bracket.on_advance_requested().unwrap();

    // SF2: D beats C
    bracket.on_announcement_acknowledged().unwrap();
    bracket.on_match_complete(d.id).unwrap();
    bracket.on_advance_requested().unwrap();

    // FINAL: D beats A
    bracket.on_announcement_acknowledged().unwrap();
    bracket.on_match_complete(d.id).unwrap();

    assert_eq!(
        bracket.presentation().calls,
        vec![
            announce("SF1", "A", "B"),
            Call::MatchResult("A".to_string()),
            announce("SF2", "C", "D"),
            Call::MatchResult("D".to_string()),
            announce("FINAL", "A", "D"),
            Call::Champion("D".to_string()),
        ]
    );

    assert_eq!(
        bracket.runner().calls,
        vec![
            Call::Initialize("A".to_string(), "B".to_string(), 5),
            Call::Run,
            Call::Initialize("C".to_string(), "D".to_string(), 5),
            Call::Run,
            Call::Initialize("A".to_string(), "D".to_string(), 5),
            Call::Run,
        ]
    );

    assert_eq!(bracket.champion(), Some(&d));
    assert_eq!(bracket.phase(), BracketPhase::Complete(knockout::bracket::Complete));

    let state = bracket.state().unwrap();
    assert_eq!(state.slot(Stage::Final).winner.as_ref(), Some(&d));
    assert_eq!(state.champion, state.slot(Stage::Final).winner);

    let stages: Vec<Stage> = bracket.history().iter().map(|r| r.stage).collect();
    assert_eq!(stages, vec![Stage::Sf1, Stage::Sf2, Stage::Final]);
}

#[test]
fn test_start_with_three_entrants_fails() {
    let mut bracket = manager();
    let err = bracket
        .start(entrants(&["A", "B", "C"]), MatchConfig::new(5))
        .unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::EntrantCount {
            expected: 4,
            got: 3
        }
    );
    assert!(bracket.presentation().calls.is_empty());
    assert!(bracket.runner().calls.is_empty());
    assert!(bracket.state().is_none());
    assert_eq!(bracket.phase(), BracketPhase::default());
}

#[test]
fn test_start_with_five_entrants_fails() {
    let mut bracket = manager();
    let err = bracket
        .start(entrants(&["A", "B", "C", "D", "E"]), MatchConfig::new(5))
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::EntrantCount { got: 5, .. }));
    assert!(bracket.presentation().calls.is_empty());
}

#[test]
fn test_score_limit_out_of_range_fails() {
    let mut bracket = manager();
    let err = bracket
        .start(entrants(&["A", "B", "C", "D"]), MatchConfig::new(99))
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigurationError::ScoreLimitOutOfRange { got: 99, .. }
    ));
    assert!(bracket.presentation().calls.is_empty());
}

#[test]
fn test_final_pairing_follows_semifinal_winners() {
    let players = entrants(&["A", "B", "C", "D"]);
    let (b, c) = (players[1].clone(), players[2].clone());
    let mut bracket = manager();
    bracket.start(players, MatchConfig::default()).unwrap();

    bracket.handle(BracketEvent::Acknowledged).unwrap();
    bracket
        .handle(BracketEvent::MatchCompleted { winner: b.id })
        .unwrap();

    // Final is not seated until the second semifinal is decided
    assert_eq!(bracket.state().unwrap().slot(Stage::Final).pairing(), None);

    bracket.handle(BracketEvent::AdvanceRequested).unwrap();
    bracket.handle(BracketEvent::Acknowledged).unwrap();
    bracket
        .handle(BracketEvent::MatchCompleted { winner: c.id })
        .unwrap();
    assert_eq!(bracket.state().unwrap().slot(Stage::Final).pairing(), None);

    bracket.handle(BracketEvent::AdvanceRequested).unwrap();
    let state = bracket.state().unwrap();
    assert_eq!(state.slot(Stage::Final).pairing(), Some((&b, &c)));
    assert_eq!(state.current_stage_index, 2);
    assert_eq!(
        bracket.presentation().calls.last(),
        Some(&announce("FINAL", "B", "C"))
    );
}

#[test]
fn test_double_advance_does_not_skip_stage() {
    let players = entrants(&["A", "B", "C", "D"]);
    let winner = players[0].id;
    let mut bracket = manager();
    bracket.start(players, MatchConfig::default()).unwrap();

    bracket.handle(BracketEvent::Acknowledged).unwrap();
    bracket
        .handle(BracketEvent::MatchCompleted { winner })
        .unwrap();
    bracket.handle(BracketEvent::AdvanceRequested).unwrap();
    let after_first = bracket.snapshot();

    let err = bracket.handle(BracketEvent::AdvanceRequested).unwrap_err();
    assert_eq!(
        err,
        ProtocolViolation::UnexpectedEvent {
            event: "AdvanceRequested",
            phase: "Announcing"
        }
    );
    assert_eq!(bracket.snapshot(), after_first);
    assert_eq!(bracket.state().unwrap().current_stage(), Stage::Sf2);
}

#[test]
fn test_match_complete_twice_keeps_first_result() {
    let players = entrants(&["A", "B", "C", "D"]);
    let (a, b) = (players[0].id, players[1].id);
    let mut bracket = manager();
    bracket.start(players, MatchConfig::default()).unwrap();
    bracket.handle(BracketEvent::Acknowledged).unwrap();

    bracket
        .handle(BracketEvent::MatchCompleted { winner: a })
        .unwrap();
    let after_first = bracket.snapshot();
    let calls_after_first = bracket.presentation().calls.len();

    assert!(
        bracket
            .handle(BracketEvent::MatchCompleted { winner: b })
            .is_err()
    );
    assert_eq!(bracket.snapshot(), after_first);
    assert_eq!(bracket.presentation().calls.len(), calls_after_first);
}

#[test]
fn test_events_after_champion_are_ignored() {
    let players = entrants(&["A", "B", "C", "D"]);
    let (a, c) = (players[0].id, players[2].id);
    let mut bracket = manager();
    bracket.start(players, MatchConfig::default()).unwrap();

    for winner in [a, c] {
        bracket.handle(BracketEvent::Acknowledged).unwrap();
        bracket
            .handle(BracketEvent::MatchCompleted { winner })
            .unwrap();
        bracket.handle(BracketEvent::AdvanceRequested).unwrap();
    }
    bracket.handle(BracketEvent::Acknowledged).unwrap();
    bracket
        .handle(BracketEvent::MatchCompleted { winner: c })
        .unwrap();
    let final_state = bracket.snapshot();

    for event in [
        BracketEvent::Acknowledged,
        BracketEvent::AdvanceRequested,
        BracketEvent::MatchCompleted { winner: a },
    ] {
        assert!(bracket.handle(event).is_err());
    }
    assert_eq!(bracket.snapshot(), final_state);
    assert_eq!(bracket.champion().map(|e| e.name.as_str()), Some("C"));
}
