//! Join and leave handling.
//!
//! ## Join
//!
//! - A filler seat present: the new human takes over its slot, color,
//!   cells and (if held) the turn. Elimination status resets.
//! - Otherwise the human is appended with the first unused palette color.
//!
//! Either way `rounds_completed` is clamped below the seat count so the
//! newcomer cannot be eliminated before its first turn.
//!
//! ## Leave
//!
//! - Exactly two humans and one of them leaves: its slot becomes the
//!   filler seat. Its cells are cleared, not transferred.
//! - Otherwise the seat is removed outright, its cells cleared, and the
//!   turn moves on if it was theirs.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::SessionConfig;
use crate::core::seat::{first_unused_color, PlayerId, Seat, SeatId};
use crate::core::state::SessionState;
use crate::error::{RejectedAction, SessionError};
use crate::rules::next_live_seat;

/// What a join did to the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    /// Took over the filler's slot at this index.
    ReplacedFiller { slot: usize },
    /// Appended at the end of the rotation.
    Appended,
}

/// What a departure did to the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveKind {
    /// The slot was handed to the filler.
    ConvertedToFiller { slot: usize },
    /// The slot was removed.
    Removed,
}

/// Roster change reported back to the host after a join or leave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterChange {
    Joined(JoinKind),
    Left(LeaveKind),
}

fn validate_join(
    state: &SessionState,
    config: &SessionConfig,
    player: PlayerId,
) -> Result<(), RejectedAction> {
    if state.seats.contains_key(&SeatId::Human(player)) {
        return Err(RejectedAction::AlreadySeated(player));
    }
    if !state.has_filler() && state.seat_order.len() >= config.max_seats {
        return Err(RejectedAction::SessionFull(config.max_seats));
    }
    Ok(())
}

/// Seat a newly joined human.
pub fn join(
    state: &mut SessionState,
    config: &SessionConfig,
    player: PlayerId,
) -> Result<JoinKind, RejectedAction> {
    validate_join(state, config, player)?;

    let new_seat = SeatId::Human(player);
    let filler_slot = state.seat_order.iter().position(|id| id.is_filler());

    let kind = match (filler_slot, state.seats.remove(&SeatId::Filler)) {
        (Some(slot), Some(filler)) => {
            state.seat_order[slot] = new_seat;
            state.seats.insert(new_seat, Seat::new(new_seat, filler.color));
            state.grid.reassign(SeatId::Filler, new_seat);
            if state.active_seat == SeatId::Filler {
                state.active_seat = new_seat;
            }
            JoinKind::ReplacedFiller { slot }
        }
        _ => {
            let color = first_unused_color(&config.palette, |c| {
                state.seats.values().any(|s| s.color == c)
            })
            .unwrap_or(config.palette[0]);

            state.seat_order.push(new_seat);
            state.seats.insert(new_seat, Seat::new(new_seat, color));
            JoinKind::Appended
        }
    };

    let seat_count = state.seat_order.len() as u32;
    if state.rounds_completed >= seat_count {
        state.rounds_completed = seat_count - 1;
    }

    info!(seat = %new_seat, ?kind, seats = seat_count, "seat joined");
    Ok(kind)
}

/// Remove a departing seat.
pub fn leave(
    state: &mut SessionState,
    config: &SessionConfig,
    seat: SeatId,
) -> Result<LeaveKind, SessionError> {
    let slot = state
        .seat_order
        .iter()
        .position(|&id| id == seat)
        .ok_or(RejectedAction::UnknownSeat(seat))?;

    let humans = state.human_count();
    let kind = if humans == 2 && !seat.is_filler() {
        convert_to_filler(state, config, seat, slot);
        LeaveKind::ConvertedToFiller { slot }
    } else {
        remove_seat(state, seat, slot)?;
        LeaveKind::Removed
    };

    info!(seat = %seat, ?kind, seats = state.seat_order.len(), "seat left");
    Ok(kind)
}

fn convert_to_filler(state: &mut SessionState, config: &SessionConfig, seat: SeatId, slot: usize) {
    let color = first_unused_color(&config.palette, |c| {
        state.seats.values().any(|s| s.color == c)
    })
    .or_else(|| {
        first_unused_color(&config.palette, |c| {
            state.seats.values().any(|s| s.id != seat && s.color == c)
        })
    })
    .unwrap_or(config.palette[0]);

    state.grid.clear_owner(seat);
    state.cascade.purge_settled(&state.grid);

    state.seats.remove(&seat);
    state.seats.insert(SeatId::Filler, Seat::new(SeatId::Filler, color));
    state.seat_order[slot] = SeatId::Filler;

    if state.active_seat == seat {
        state.active_seat = SeatId::Filler;
        state.cascade.clear();
    }
}

fn remove_seat(state: &mut SessionState, seat: SeatId, slot: usize) -> Result<(), SessionError> {
    state.grid.clear_owner(seat);
    state.cascade.purge_settled(&state.grid);

    state.seat_order.remove(slot);
    state.seats.remove(&seat);

    if state.active_seat == seat && !state.seat_order.is_empty() {
        // The seat that followed the departed one now sits at `slot`
        let next = next_live_seat(state, slot % state.seat_order.len()).ok_or_else(|| {
            SessionError::ConsistencyFault("no non-eliminated seat after departure".to_string())
        })?;
        state.active_seat = next;
        state.cascade.clear();
    }
    Ok(())
}
