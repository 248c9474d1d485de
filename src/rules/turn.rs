//! Turn rotation, elimination and win detection.
//!
//! ## Elimination
//!
//! Only evaluated once `rounds_completed >= seat_order.len()`, i.e. every
//! seat has had a chance to place. A seat that has placed at least once
//! and owns no cells is eliminated. Seats that never placed are exempt.
//!
//! ## Game end
//!
//! When at most one seat survives the result is recorded, the pending
//! cascade is dropped and a report is built for the seated humans.
//! Checking again after that is a no-op.

use tracing::{error, info};

use crate::core::seat::SeatId;
use crate::core::state::SessionState;
use crate::error::SessionError;

use super::outcome::{GameReport, GameResult};

/// Mark seats with no board presence as eliminated.
///
/// Returns the seats eliminated by this call.
pub fn apply_eliminations(state: &mut SessionState) -> Vec<SeatId> {
    if (state.rounds_completed as usize) < state.seat_order.len() {
        return Vec::new();
    }

    let mut eliminated = Vec::new();
    for &id in &state.seat_order {
        let owns_cells = state.grid.owned_by(id) > 0;
        if let Some(seat) = state.seats.get_mut(&id) {
            if !seat.is_eliminated && seat.has_ever_placed && !owns_cells {
                seat.is_eliminated = true;
                eliminated.push(id);
            }
        }
    }

    for id in &eliminated {
        info!(seat = %id, round = state.rounds_completed, "seat eliminated");
    }
    eliminated
}

/// Run eliminations and record the result if the game is decided.
///
/// Returns the terminal report exactly once, on the call that ends the game.
pub fn check_game_end(state: &mut SessionState) -> Option<GameReport> {
    if state.result.is_some() {
        return None;
    }

    apply_eliminations(state);

    let survivors = state.survivors();
    if survivors.len() > 1 {
        return None;
    }

    let result = match survivors.first() {
        Some(&winner) => GameResult::Winner(winner),
        None => GameResult::Draw,
    };
    info!(?result, rounds = state.rounds_completed, "game over");

    let report = GameReport::new(&result, state.humans());
    state.cascade.clear();
    state.result = Some(result);
    state.report = Some(report.clone());
    Some(report)
}

/// First non-eliminated seat scanning cyclically from `start` (inclusive).
#[must_use]
pub fn next_live_seat(state: &SessionState, start: usize) -> Option<SeatId> {
    let len = state.seat_order.len();
    (0..len)
        .map(|offset| state.seat_order[(start + offset) % len])
        .find(|id| state.seats.get(id).is_some_and(|s| !s.is_eliminated))
}

/// Hand the turn to the next non-eliminated seat and count the round.
pub fn advance_turn(state: &mut SessionState) -> Result<SeatId, SessionError> {
    let current = state
        .seat_order
        .iter()
        .position(|&id| id == state.active_seat)
        .ok_or_else(|| fault(format!("active seat {} is not seated", state.active_seat)))?;

    let next = next_live_seat(state, current + 1)
        .ok_or_else(|| fault("no non-eliminated seat to take the turn".to_string()))?;

    state.active_seat = next;
    state.rounds_completed += 1;
    Ok(next)
}

/// Settle a finished turn: end the game or pass the turn on.
pub fn end_turn(state: &mut SessionState) -> Result<Option<GameReport>, SessionError> {
    if let Some(report) = check_game_end(state) {
        return Ok(Some(report));
    }
    if state.result.is_none() {
        advance_turn(state)?;
    }
    Ok(None)
}

/// Move the turn off an active seat that was just eliminated.
///
/// Rotation continues from the eliminated seat's slot and no round is
/// counted. Does nothing if the active seat is still live.
pub fn pass_from_eliminated(state: &mut SessionState) -> Result<(), SessionError> {
    let eliminated = state
        .seats
        .get(&state.active_seat)
        .map_or(true, |seat| seat.is_eliminated);
    if state.result.is_some() || !eliminated {
        return Ok(());
    }

    let current = state
        .seat_order
        .iter()
        .position(|&id| id == state.active_seat)
        .unwrap_or(0);
    let next = next_live_seat(state, current)
        .ok_or_else(|| fault("no non-eliminated seat to take the turn".to_string()))?;

    info!(from = %state.active_seat, to = %next, "turn passed from eliminated seat");
    state.active_seat = next;
    state.cascade.clear();
    Ok(())
}

fn fault(message: String) -> SessionError {
    error!(%message, "consistency fault");
    SessionError::ConsistencyFault(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionConfig;
    use crate::core::seat::PlayerId;
    use crate::rules::Standing;

    fn state(humans: &[u32]) -> SessionState {
        let ids: Vec<_> = humans.iter().copied().map(PlayerId::new).collect();
        SessionState::new(&SessionConfig::default().with_size(3, 3), &ids).unwrap()
    }

    fn occupy(state: &mut SessionState, index: usize, seat: SeatId) {
        let cell = state.grid.get_mut(index).unwrap();
        cell.owner = Some(seat);
        cell.count = 1;
        state.seats.get_mut(&seat).unwrap().has_ever_placed = true;
    }

    #[test]
    fn test_advance_rotates_and_counts() {
        let mut s = state(&[1, 2, 3]);

        assert_eq!(advance_turn(&mut s).unwrap(), SeatId::human(2));
        assert_eq!(advance_turn(&mut s).unwrap(), SeatId::human(3));
        assert_eq!(advance_turn(&mut s).unwrap(), SeatId::human(1));
        assert_eq!(s.rounds_completed, 3);
    }

    #[test]
    fn test_advance_skips_eliminated() {
        let mut s = state(&[1, 2, 3]);
        s.seats.get_mut(&SeatId::human(2)).unwrap().is_eliminated = true;

        assert_eq!(advance_turn(&mut s).unwrap(), SeatId::human(3));
        assert_eq!(advance_turn(&mut s).unwrap(), SeatId::human(1));
    }

    #[test]
    fn test_advance_with_everyone_eliminated_faults() {
        let mut s = state(&[1, 2]);
        for seat in s.seats.values_mut() {
            seat.is_eliminated = true;
        }

        let err = advance_turn(&mut s).unwrap_err();
        assert!(matches!(err, SessionError::ConsistencyFault(_)));
    }

    #[test]
    fn test_no_elimination_before_threshold() {
        let mut s = state(&[1, 2]);
        occupy(&mut s, 0, SeatId::human(1));
        s.seats.get_mut(&SeatId::human(2)).unwrap().has_ever_placed = true;
        s.rounds_completed = 1;

        assert!(apply_eliminations(&mut s).is_empty());
        assert!(check_game_end(&mut s).is_none());
    }

    #[test]
    fn test_elimination_after_threshold() {
        let mut s = state(&[1, 2, 3]);
        occupy(&mut s, 0, SeatId::human(1));
        occupy(&mut s, 8, SeatId::human(3));
        s.seats.get_mut(&SeatId::human(2)).unwrap().has_ever_placed = true;
        s.rounds_completed = 3;

        assert_eq!(apply_eliminations(&mut s), vec![SeatId::human(2)]);
        // Already eliminated seats are not reported twice
        assert!(apply_eliminations(&mut s).is_empty());
        assert!(s.seat(SeatId::human(2)).unwrap().is_eliminated);
    }

    #[test]
    fn test_never_placed_is_exempt() {
        let mut s = state(&[1, 2]);
        occupy(&mut s, 0, SeatId::human(1));
        s.rounds_completed = 5;

        assert!(apply_eliminations(&mut s).is_empty());
        assert!(check_game_end(&mut s).is_none());
    }

    #[test]
    fn test_win_is_recorded_once() {
        let mut s = state(&[1, 2]);
        occupy(&mut s, 0, SeatId::human(1));
        s.seats.get_mut(&SeatId::human(2)).unwrap().has_ever_placed = true;
        s.rounds_completed = 2;

        let report = check_game_end(&mut s).unwrap();
        assert_eq!(s.result, Some(GameResult::Winner(SeatId::human(1))));
        assert_eq!(report.standing(PlayerId::new(1)), Some(Standing::Won));
        assert_eq!(report.standing(PlayerId::new(2)), Some(Standing::Lost));

        assert!(check_game_end(&mut s).is_none());
        assert_eq!(s.report(), Some(&report));
    }

    #[test]
    fn test_mutual_elimination_is_draw() {
        let mut s = state(&[1, 2]);
        for seat in s.seats.values_mut() {
            seat.has_ever_placed = true;
        }
        s.rounds_completed = 2;

        check_game_end(&mut s);
        assert_eq!(s.result, Some(GameResult::Draw));
    }

    #[test]
    fn test_report_excludes_filler() {
        let mut s = state(&[1]);
        occupy(&mut s, 0, SeatId::Filler);
        s.seats.get_mut(&SeatId::human(1)).unwrap().has_ever_placed = true;
        s.rounds_completed = 2;

        let report = check_game_end(&mut s).unwrap();
        assert_eq!(s.result, Some(GameResult::Winner(SeatId::Filler)));
        assert_eq!(report.standings, vec![(PlayerId::new(1), Standing::Lost)]);
    }

    #[test]
    fn test_end_turn_advances_when_game_continues() {
        let mut s = state(&[1, 2]);
        occupy(&mut s, 0, SeatId::human(1));

        assert_eq!(end_turn(&mut s).unwrap(), None);
        assert_eq!(s.active_seat, SeatId::human(2));
        assert_eq!(s.rounds_completed, 1);
    }

    #[test]
    fn test_pass_from_eliminated_keeps_round() {
        let mut s = state(&[1, 2, 3]);
        s.active_seat = SeatId::human(2);
        s.rounds_completed = 4;
        s.seats.get_mut(&SeatId::human(2)).unwrap().is_eliminated = true;

        pass_from_eliminated(&mut s).unwrap();
        assert_eq!(s.active_seat, SeatId::human(3));
        assert_eq!(s.rounds_completed, 4);

        // Live active seat is left alone
        pass_from_eliminated(&mut s).unwrap();
        assert_eq!(s.active_seat, SeatId::human(3));
    }

    #[test]
    fn test_next_live_seat_wraps() {
        let mut s = state(&[1, 2, 3]);
        s.seats.get_mut(&SeatId::human(1)).unwrap().is_eliminated = true;

        assert_eq!(next_live_seat(&s, 3), Some(SeatId::human(2)));
        assert_eq!(next_live_seat(&s, 2), Some(SeatId::human(3)));
    }
}
