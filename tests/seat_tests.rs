//! Seat lifecycle tests.
//!
//! Humans joining and leaving mid-game, and the filler seat that keeps a
//! lone human company.

use chain_reaction::cascade::CascadeStatus;
use chain_reaction::core::{PlayerId, SeatId, SessionConfig, DEFAULT_PALETTE};
use chain_reaction::error::RejectedAction;
use chain_reaction::rules::{GameResult, Standing};
use chain_reaction::session::Session;
use chain_reaction::{JoinKind, LeaveKind, RosterChange, UniformRandomFiller};

fn p(id: u32) -> SeatId {
    SeatId::human(id)
}

fn session(humans: &[u32], width: usize, height: usize) -> Session {
    let ids: Vec<_> = humans.iter().copied().map(PlayerId::new).collect();
    Session::new(SessionConfig::default().with_size(width, height), &ids).unwrap()
}

// =============================================================================
// Leaving
// =============================================================================

#[test]
fn test_leave_on_turn_hands_slot_to_filler() {
    let mut s = session(&[1, 2], 3, 3);
    s.place(p(1), 0).unwrap();
    s.place(p(2), 8).unwrap();
    assert_eq!(s.state().active_seat(), p(1));

    let outcome = s.on_seat_left(p(1)).unwrap();

    assert!(outcome.report.is_none());
    assert_eq!(outcome.roster, Some(RosterChange::Left(LeaveKind::ConvertedToFiller { slot: 0 })));
    assert_eq!(s.state().seat_order(), &[SeatId::Filler, p(2)]);
    assert_eq!(s.state().active_seat(), SeatId::Filler);
    assert!(s.state().is_filler_turn());

    // Cells cleared rather than inherited, color previously unused
    assert_eq!(s.state().grid().get(0).unwrap().owner, None);
    assert_eq!(s.state().grid().owned_by(SeatId::Filler), 0);
    assert_eq!(s.state().seat(SeatId::Filler).unwrap().color, DEFAULT_PALETTE[2]);
    assert!(s.state().seat(p(1)).is_none());
}

#[test]
fn test_leave_off_turn_keeps_turn() {
    let mut s = session(&[1, 2], 3, 3);
    s.place(p(1), 0).unwrap();
    s.place(p(2), 8).unwrap();

    s.on_seat_left(p(2)).unwrap();

    assert_eq!(s.state().seat_order(), &[p(1), SeatId::Filler]);
    assert_eq!(s.state().active_seat(), p(1));
    assert_eq!(s.state().grid().total_tokens(), 1);
}

#[test]
fn test_leave_with_three_humans_removes_seat() {
    let mut s = session(&[1, 2, 3], 3, 3);
    s.place(p(1), 0).unwrap();
    assert_eq!(s.state().active_seat(), p(2));
    s.place(p(2), 8).unwrap();
    s.place(p(3), 6).unwrap();
    s.place(p(1), 2).unwrap();
    let rounds = s.state().rounds_completed();

    let outcome = s.on_seat_left(p(2)).unwrap();

    assert_eq!(outcome.roster, Some(RosterChange::Left(LeaveKind::Removed)));
    assert_eq!(s.state().seat_order(), &[p(1), p(3)]);
    assert!(!s.state().has_filler());
    assert_eq!(s.state().active_seat(), p(3));
    assert_eq!(s.state().rounds_completed(), rounds);
    assert_eq!(s.state().grid().get(8).unwrap().count, 0);
}

#[test]
fn test_leave_from_last_slot_wraps_to_first() {
    let mut s = session(&[1, 2, 3], 3, 3);
    s.place(p(1), 0).unwrap();
    s.place(p(2), 8).unwrap();
    assert_eq!(s.state().active_seat(), p(3));

    s.on_seat_left(p(3)).unwrap();

    assert_eq!(s.state().active_seat(), p(1));
}

#[test]
fn test_leave_mid_cascade_abandons_it() {
    let config = SessionConfig::default().with_size(3, 3).paced();
    let humans: Vec<_> = (1..=3).map(PlayerId::new).collect();
    let mut s = Session::new(config, &humans).unwrap();

    s.place(p(1), 0).unwrap();
    s.place(p(2), 8).unwrap();
    s.place(p(3), 6).unwrap();
    let outcome = s.place(p(1), 0).unwrap();
    assert_eq!(outcome.status, CascadeStatus::Pending(1));

    let outcome = s.on_seat_left(p(1)).unwrap();

    assert_eq!(outcome.status, CascadeStatus::Settled);
    assert!(s.state().cascade().is_settled());
    assert_eq!(s.state().active_seat(), p(2));
    assert_eq!(s.state().grid().total_tokens(), 2);
    assert_eq!(s.legal_cells(p(2)).len(), 8);
}

#[test]
fn test_last_opponent_leaving_ends_game() {
    let mut s = session(&[1], 3, 3);
    s.place(p(1), 4).unwrap();

    let outcome = s.on_seat_left(SeatId::Filler).unwrap();

    let report = outcome.report.expect("game should end");
    assert_eq!(s.state().result(), Some(&GameResult::Winner(p(1))));
    assert_eq!(report.standings, vec![(PlayerId::new(1), Standing::Won)]);
}

#[test]
fn test_report_excludes_filler() {
    let mut s = session(&[1], 2, 2);
    s.place(p(1), 0).unwrap();
    s.place(SeatId::Filler, 3).unwrap();
    s.place(p(1), 1).unwrap();
    s.place(SeatId::Filler, 2).unwrap();

    let outcome = s.place(p(1), 0).unwrap();

    let report = outcome.report.expect("game should end");
    assert_eq!(report.standings, vec![(PlayerId::new(1), Standing::Won)]);
    assert!(s.state().seat(SeatId::Filler).unwrap().is_eliminated);
}

#[test]
fn test_leave_unknown_seat_rejected() {
    let mut s = session(&[1, 2], 3, 3);
    let before = s.snapshot();

    let err = s.on_seat_left(p(7)).unwrap_err();

    assert_eq!(err.rejection(), Some(&RejectedAction::UnknownSeat(p(7))));
    assert_eq!(s.snapshot(), before);
    assert!(s.state().history().is_empty());
}

// =============================================================================
// Joining
// =============================================================================

#[test]
fn test_join_replaces_filler_on_its_turn() {
    let config = SessionConfig::default().with_size(4, 4).with_seed(5);
    let mut s = Session::new(config, &[PlayerId::new(1)]).unwrap();
    s.place(p(1), 5).unwrap();
    s.play_filler_turn(&UniformRandomFiller).unwrap();
    s.place(p(1), 5).unwrap();

    let filler_color = s.state().seat(SeatId::Filler).unwrap().color;
    let filler_cells = s.state().grid().owned_by(SeatId::Filler);
    assert!(s.state().is_filler_turn());

    let outcome = s.on_seat_joined(PlayerId::new(2)).unwrap();

    assert_eq!(outcome.roster, Some(RosterChange::Joined(JoinKind::ReplacedFiller { slot: 1 })));
    assert!(!s.state().has_filler());
    assert_eq!(s.state().seat_order(), &[p(1), p(2)]);
    assert_eq!(s.state().active_seat(), p(2));
    assert!(!s.state().is_filler_turn());
    assert_eq!(s.state().seat(p(2)).unwrap().color, filler_color);
    assert_eq!(s.state().grid().owned_by(p(2)), filler_cells);
    assert_eq!(s.state().grid().owned_by(SeatId::Filler), 0);
    assert_eq!(s.state().rounds_completed(), 1);
}

#[test]
fn test_join_after_departure_takes_over_filler_slot() {
    let mut s = session(&[1, 2], 4, 4);
    s.on_seat_left(p(1)).unwrap();
    s.play_filler_turn(&UniformRandomFiller).unwrap();

    let cell = s.legal_cells(p(2))[0];
    s.place(p(2), cell).unwrap();
    assert_eq!(s.state().rounds_completed(), 2);

    s.on_seat_joined(PlayerId::new(3)).unwrap();

    assert_eq!(s.state().seat_order(), &[p(3), p(2)]);
    assert_eq!(s.state().active_seat(), p(3));
    assert_eq!(s.state().seat(p(3)).unwrap().color, DEFAULT_PALETTE[2]);
    assert_eq!(s.state().grid().owned_by(p(3)), 1);
    assert_eq!(s.state().rounds_completed(), 1);
}

#[test]
fn test_join_appends_when_no_filler() {
    let mut s = session(&[1, 2], 3, 3);

    let outcome = s.on_seat_joined(PlayerId::new(3)).unwrap();

    assert_eq!(outcome.roster, Some(RosterChange::Joined(JoinKind::Appended)));
    assert_eq!(s.state().seat_order(), &[p(1), p(2), p(3)]);
    assert_eq!(s.state().seat(p(3)).unwrap().color, DEFAULT_PALETTE[2]);
    assert_eq!(s.state().active_seat(), p(1));
}

#[test]
fn test_join_rejections() {
    let mut s = session(&[1, 2, 3, 4, 5, 6], 3, 3);

    let err = s.on_seat_joined(PlayerId::new(2)).unwrap_err();
    assert_eq!(err.rejection(), Some(&RejectedAction::AlreadySeated(PlayerId::new(2))));

    let err = s.on_seat_joined(PlayerId::new(7)).unwrap_err();
    assert_eq!(err.rejection(), Some(&RejectedAction::SessionFull(6)));
}

#[test]
fn test_placement_leaves_roster_unreported() {
    let mut s = session(&[1, 2], 3, 3);

    let outcome = s.place(p(1), 4).unwrap();

    assert!(outcome.roster.is_none());
}

#[test]
fn test_roster_change_serializes() {
    let mut s = session(&[1, 2], 3, 3);
    let outcome = s.on_seat_left(p(2)).unwrap();

    let json = serde_json::to_string(&outcome).unwrap();
    let back: chain_reaction::ActionOutcome = serde_json::from_str(&json).unwrap();

    assert_eq!(back, outcome);
}

#[test]
fn test_lifecycle_rejected_after_game_over() {
    let mut s = session(&[1], 3, 3);
    s.on_seat_left(SeatId::Filler).unwrap();
    assert!(s.is_over());

    let err = s.on_seat_joined(PlayerId::new(2)).unwrap_err();
    assert_eq!(err.rejection(), Some(&RejectedAction::GameOver));
    let err = s.on_seat_left(p(1)).unwrap_err();
    assert_eq!(err.rejection(), Some(&RejectedAction::GameOver));
}
