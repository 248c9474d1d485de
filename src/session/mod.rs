//! The authoritative session and its action surface.
//!
//! A `Session` owns one match. Hosts submit one action at a time:
//!
//! - `place(seat, cell)`: a human (or the filler, via `SeatId::Filler`) places a token
//! - `advance_cascade()`: process one pending detonation (paced mode)
//! - `on_seat_joined` / `on_seat_left`: lifecycle events from the host
//!
//! Every action either applies completely or is rejected with the state
//! untouched. After any action, `snapshot()` gives the renderer a
//! read-only view, and the action that ends the game returns the terminal
//! report.
//!
//! ## Example
//!
//! ```
//! use chain_reaction::core::{PlayerId, SeatId, SessionConfig};
//! use chain_reaction::session::Session;
//!
//! let mut session = Session::new(SessionConfig::default(), &[PlayerId::new(1), PlayerId::new(2)]).unwrap();
//!
//! session.place(SeatId::human(1), 0).unwrap();
//! assert_eq!(session.state().active_seat(), SeatId::human(2));
//!
//! // Player 2 cannot reinforce player 1's cell
//! assert!(session.place(SeatId::human(2), 0).is_err());
//! ```

mod builder;

pub use builder::SessionBuilder;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::ai::FillerPolicy;
use crate::cascade::{CascadeStatus, StepOutcome};
use crate::core::{
    Action, ActionRecord, CascadeMode, GameRng, PlayerId, SeatId, SessionConfig, SessionSnapshot,
    SessionState,
};
use crate::error::{ConfigError, RejectedAction, SessionError};
use crate::rules::{self, GameReport};
use crate::seats::{self, RosterChange};

/// What an accepted action left behind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Cascade state after the action.
    pub status: CascadeStatus,

    /// Terminal report, present only on the action that ended the game.
    pub report: Option<GameReport>,

    /// How the roster changed, for joins and departures.
    pub roster: Option<RosterChange>,
}

impl ActionOutcome {
    fn new(status: CascadeStatus, report: Option<GameReport>) -> Self {
        Self {
            status,
            report,
            roster: None,
        }
    }

    fn with_roster(mut self, change: RosterChange) -> Self {
        self.roster = Some(change);
        self
    }

    /// True if this action ended the game.
    #[must_use]
    pub fn ended_game(&self) -> bool {
        self.report.is_some()
    }
}

/// One match: configuration, state and the filler's RNG.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    rng: GameRng,
}

impl Session {
    /// Start a match for `humans` in join order.
    pub fn new(config: SessionConfig, humans: &[PlayerId]) -> Result<Self, ConfigError> {
        let state = SessionState::new(&config, humans)?;
        let rng = GameRng::new(config.seed);
        Ok(Self { config, state, rng })
    }

    /// Start building a session with presets.
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Terminal report, once the game is over.
    #[must_use]
    pub fn report(&self) -> Option<&GameReport> {
        self.state.report()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Cells `seat` may place on right now.
    ///
    /// Empty unless it is `seat`'s turn and no cascade is pending.
    #[must_use]
    pub fn legal_cells(&self, seat: SeatId) -> Vec<usize> {
        if self.state.is_over() || !self.state.cascade.is_settled() || self.state.active_seat != seat {
            return Vec::new();
        }
        self.state
            .grid
            .iter()
            .filter(|(_, c)| c.accepts(seat))
            .map(|(i, _)| i)
            .collect()
    }

    // === Actions ===

    /// Apply any action.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, SessionError> {
        match action {
            Action::Place { seat, cell } => self.place(seat, cell),
            Action::AdvanceCascade => self.advance_cascade(),
            Action::Join(player) => self.on_seat_joined(player),
            Action::Leave(seat) => self.on_seat_left(seat),
        }
    }

    /// Place a token for `seat` on `cell`.
    #[instrument(skip(self))]
    pub fn place(&mut self, seat: SeatId, cell: usize) -> Result<ActionOutcome, SessionError> {
        self.validate_place(seat, cell).map_err(rejected)?;

        let grid_cell = self
            .state
            .grid
            .get_mut(cell)
            .ok_or_else(|| SessionError::ConsistencyFault(format!("cell {cell} vanished")))?;
        grid_cell.count += 1;
        grid_cell.owner = Some(seat);
        let count = grid_cell.count;

        if let Some(record) = self.state.seats.get_mut(&seat) {
            record.has_ever_placed = true;
        }
        self.state.cascade.reset_guard();
        self.state.cascade.notify_increment(&self.state.grid, cell);
        self.record(Action::Place { seat, cell });

        debug!(%seat, cell, count, pending = self.state.cascade.pending(), "placed");

        if self.state.cascade.is_settled() {
            let report = rules::end_turn(&mut self.state)?;
            return Ok(ActionOutcome::new(CascadeStatus::Settled, report));
        }

        match self.config.cascade_mode {
            CascadeMode::Immediate => self.run_cascade(),
            CascadeMode::Paced => Ok(ActionOutcome::new(self.state.cascade.status(), None)),
        }
    }

    /// Process one pending detonation. A no-op when nothing is pending.
    #[instrument(skip(self))]
    pub fn advance_cascade(&mut self) -> Result<ActionOutcome, SessionError> {
        if self.state.is_over() || self.state.cascade.is_settled() {
            return Ok(ActionOutcome::new(CascadeStatus::Settled, None));
        }
        self.record(Action::AdvanceCascade);
        self.step_cascade()
    }

    /// A human joined the session.
    #[instrument(skip(self))]
    pub fn on_seat_joined(&mut self, player: PlayerId) -> Result<ActionOutcome, SessionError> {
        if self.state.is_over() {
            return Err(rejected(RejectedAction::GameOver));
        }
        let kind = seats::join(&mut self.state, &self.config, player).map_err(rejected)?;
        self.record(Action::Join(player));
        Ok(ActionOutcome::new(self.state.cascade.status(), None).with_roster(RosterChange::Joined(kind)))
    }

    /// A seat left the session.
    #[instrument(skip(self))]
    pub fn on_seat_left(&mut self, seat: SeatId) -> Result<ActionOutcome, SessionError> {
        if self.state.is_over() {
            return Err(rejected(RejectedAction::GameOver));
        }
        let kind = seats::leave(&mut self.state, &self.config, seat).map_err(|err| match err {
            SessionError::Rejected(reason) => rejected(reason),
            fault => fault,
        })?;
        self.record(Action::Leave(seat));

        let report = rules::check_game_end(&mut self.state);
        if report.is_none() {
            // The departure may have eliminated whoever holds the turn
            rules::pass_from_eliminated(&mut self.state)?;
        }
        Ok(ActionOutcome::new(self.state.cascade.status(), report).with_roster(RosterChange::Left(kind)))
    }

    /// Let `policy` pick the filler's cell and place it.
    pub fn play_filler_turn(&mut self, policy: &impl FillerPolicy) -> Result<ActionOutcome, SessionError> {
        if self.state.is_over() {
            return Err(rejected(RejectedAction::GameOver));
        }
        if !self.state.is_filler_turn() {
            return Err(rejected(RejectedAction::FillerNotOnTurn));
        }

        let snapshot = self.state.snapshot();
        let mut rng = self.rng.for_turn(u64::from(self.state.next_sequence()));
        let cell = policy
            .choose_cell(&snapshot, SeatId::Filler, &mut rng)
            .ok_or_else(|| rejected(RejectedAction::NoLegalMove(SeatId::Filler)))?;
        self.place(SeatId::Filler, cell)
    }

    /// Re-apply recorded actions to this (fresh) session.
    pub fn replay(&mut self, records: &[ActionRecord]) -> Result<(), SessionError> {
        for record in records {
            self.apply(record.action)?;
        }
        Ok(())
    }

    // === Internals ===

    fn validate_place(&self, seat: SeatId, cell: usize) -> Result<(), RejectedAction> {
        let state = &self.state;

        if state.is_over() {
            return Err(RejectedAction::GameOver);
        }
        if !state.cascade.is_settled() {
            return Err(RejectedAction::CascadeInProgress);
        }

        if state.seat(seat).is_none() {
            return Err(RejectedAction::UnknownSeat(seat));
        }
        match seat {
            SeatId::Filler if !state.is_filler_turn() => {
                return Err(RejectedAction::FillerNotOnTurn);
            }
            SeatId::Human(_) if state.is_filler_turn() => {
                return Err(RejectedAction::HumanDuringFillerTurn);
            }
            _ => {}
        }
        if seat != state.active_seat {
            return Err(RejectedAction::NotYourTurn {
                seat,
                active: state.active_seat,
            });
        }

        let target = state.grid.get(cell).ok_or(RejectedAction::CellOutOfRange {
            index: cell,
            len: state.grid.len(),
        })?;
        match target.owner {
            Some(owner) if owner != seat => Err(RejectedAction::CellOwnedByOpponent { index: cell, owner }),
            _ => Ok(()),
        }
    }

    /// Drive the cascade until it settles, halts or ends the game.
    fn run_cascade(&mut self) -> Result<ActionOutcome, SessionError> {
        loop {
            let outcome = self.step_cascade()?;
            if outcome.ended_game() || !matches!(outcome.status, CascadeStatus::Pending(_)) {
                return Ok(outcome);
            }
        }
    }

    /// One detonation plus the checks that follow it.
    fn step_cascade(&mut self) -> Result<ActionOutcome, SessionError> {
        let state = &mut self.state;

        match state.cascade.step(&mut state.grid) {
            StepOutcome::Idle => return Ok(ActionOutcome::new(CascadeStatus::Settled, None)),
            StepOutcome::Halted => {
                warn!(
                    steps = state.cascade.steps(),
                    limit = state.cascade.limit(),
                    pending = state.cascade.pending(),
                    "cascade runaway, halting"
                );
                state.cascade.clear();
                let report = rules::end_turn(state)?;
                return Ok(ActionOutcome::new(CascadeStatus::Halted, report));
            }
            StepOutcome::Skipped { index } => {
                debug!(index, "skipped settled cell");
            }
            StepOutcome::Detonated { index, owner, neighbors } => {
                debug!(index, %owner, neighbors = ?neighbors.as_slice(), "detonated");
            }
        }

        if let Some(report) = rules::check_game_end(state) {
            return Ok(ActionOutcome::new(CascadeStatus::Settled, Some(report)));
        }
        if state.cascade.is_settled() {
            rules::advance_turn(state)?;
        }
        Ok(ActionOutcome::new(state.cascade.status(), None))
    }

    fn record(&mut self, action: Action) {
        let record = ActionRecord::new(action, self.state.rounds_completed, self.state.next_sequence());
        self.state.record(record);
    }
}

fn rejected(reason: RejectedAction) -> SessionError {
    warn!(%reason, "action rejected");
    SessionError::Rejected(reason)
}
