//! Session state and read-only snapshots.
//!
//! ## SessionState
//!
//! The single authoritative mutable state of a match:
//! - Grid contents
//! - Seat order (turn rotation) and per-seat records
//! - Active seat, rounds completed, result
//! - Pending cascade and its step guard
//! - Action history
//!
//! Only the cascade engine and placement mutate cells; only seat
//! management and the elimination check mutate seats.
//!
//! ## SessionSnapshot
//!
//! Owned, serializable view handed to renderers. Cells share structure
//! with the live grid, so taking a snapshot is cheap.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::SessionConfig;
use super::grid::{Cell, Grid};
use super::seat::{PlayerId, Seat, SeatId};
use crate::cascade::CascadeEngine;
use crate::error::ConfigError;
use crate::rules::{GameReport, GameResult};

/// Authoritative state of one match.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub(crate) grid: Grid,

    /// Turn rotation. Mirrors the keys of `seats`.
    pub(crate) seat_order: Vec<SeatId>,

    pub(crate) seats: FxHashMap<SeatId, Seat>,

    pub(crate) active_seat: SeatId,

    /// Set once; nothing else changes afterwards.
    pub(crate) result: Option<GameResult>,

    pub(crate) report: Option<GameReport>,

    pub(crate) rounds_completed: u32,

    pub(crate) cascade: CascadeEngine,

    pub(crate) history: Vector<ActionRecord>,
}

impl SessionState {
    /// Create the initial state for `humans` in join order.
    ///
    /// A lone human is paired with the filler seat. Colors are assigned
    /// from the palette by seat index.
    pub fn new(config: &SessionConfig, humans: &[PlayerId]) -> Result<Self, ConfigError> {
        config.validate()?;

        if humans.is_empty() {
            return Err(ConfigError::NoHumans);
        }
        if humans.len() > config.max_seats {
            return Err(ConfigError::TooManyHumans {
                count: humans.len(),
                max_seats: config.max_seats,
            });
        }
        for (i, id) in humans.iter().enumerate() {
            if humans[..i].contains(id) {
                return Err(ConfigError::DuplicateHuman(*id));
            }
        }

        let mut seat_order: Vec<SeatId> = humans.iter().copied().map(SeatId::Human).collect();
        if seat_order.len() == 1 {
            seat_order.push(SeatId::Filler);
        }

        let seats = seat_order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, Seat::new(id, config.palette[i % config.palette.len()])))
            .collect();

        let spec = config.grid_spec();

        Ok(Self {
            grid: Grid::new(spec),
            active_seat: seat_order[0],
            seat_order,
            seats,
            result: None,
            report: None,
            rounds_completed: 0,
            cascade: CascadeEngine::new(spec.cell_count(), config.cascade_step_limit()),
            history: Vector::new(),
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn seat_order(&self) -> &[SeatId] {
        &self.seat_order
    }

    #[must_use]
    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(&id)
    }

    /// Seats in rotation order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seat_order.iter().filter_map(|id| self.seats.get(id))
    }

    #[must_use]
    pub fn active_seat(&self) -> SeatId {
        self.active_seat
    }

    #[must_use]
    pub fn is_filler_turn(&self) -> bool {
        self.active_seat.is_filler()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn report(&self) -> Option<&GameReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    #[must_use]
    pub fn cascade(&self) -> &CascadeEngine {
        &self.cascade
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn has_filler(&self) -> bool {
        self.seats.contains_key(&SeatId::Filler)
    }

    /// Human seats in rotation order.
    pub fn humans(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seat_order.iter().filter_map(|id| id.player())
    }

    #[must_use]
    pub fn human_count(&self) -> usize {
        self.humans().count()
    }

    /// Seats still in the game.
    #[must_use]
    pub fn survivors(&self) -> Vec<SeatId> {
        self.seats()
            .filter(|s| !s.is_eliminated)
            .map(|s| s.id)
            .collect()
    }

    pub(crate) fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    pub(crate) fn next_sequence(&self) -> u32 {
        self.history.len() as u32
    }

    /// Build a read-only snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            width: self.grid.spec().width,
            height: self.grid.spec().height,
            cells: self.grid.cells().clone(),
            seats: self.seats().cloned().collect(),
            active_seat: self.active_seat,
            is_filler_turn: self.is_filler_turn(),
            result: self.result.clone(),
            rounds_completed: self.rounds_completed,
            pending_cascade: self.cascade.pending(),
        }
    }
}

/// Read-only view of a session for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vector<Cell>,
    /// Seats in rotation order.
    pub seats: Vec<Seat>,
    pub active_seat: SeatId,
    pub is_filler_turn: bool,
    pub result: Option<GameResult>,
    pub rounds_completed: u32,
    pub pending_cascade: usize,
}

impl SessionSnapshot {
    #[must_use]
    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Cells `seat` may place on, ignoring whose turn it is.
    pub fn placeable_cells(&self, seat: SeatId) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.accepts(seat))
            .map(|(i, _)| i)
    }
}
