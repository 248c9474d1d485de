//! Error types.
//!
//! - `RejectedAction`: a precondition failed. Recoverable; state is unchanged.
//! - `SessionError`: what session entry points return. Wraps rejections and
//!   carries the fatal `ConsistencyFault` for broken invariants.
//! - `ConfigError`: the session could not be built.

use thiserror::Error;

use crate::core::seat::{PlayerId, SeatId};

/// Why an action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RejectedAction {
    #[error("game is already over")]
    GameOver,
    #[error("{seat} acted but it is {active}'s turn")]
    NotYourTurn { seat: SeatId, active: SeatId },
    #[error("filler move received but it is not the filler's turn")]
    FillerNotOnTurn,
    #[error("human move received during the filler's turn")]
    HumanDuringFillerTurn,
    #[error("{0} is not seated")]
    UnknownSeat(SeatId),
    #[error("cell {index} is out of range (grid has {len} cells)")]
    CellOutOfRange { index: usize, len: usize },
    #[error("cell {index} is owned by {owner}")]
    CellOwnedByOpponent { index: usize, owner: SeatId },
    #[error("a cascade is still resolving")]
    CascadeInProgress,
    #[error("{0} is already seated")]
    AlreadySeated(PlayerId),
    #[error("session is full ({0} seats)")]
    SessionFull(usize),
    #[error("{0} has no legal cell to place on")]
    NoLegalMove(SeatId),
}

/// Errors returned by session actions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("rejected: {0}")]
    Rejected(#[from] RejectedAction),
    /// An invariant was broken. The session should be discarded.
    #[error("consistency fault: {0}")]
    ConsistencyFault(String),
}

impl SessionError {
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The rejection reason, if this is a rejection.
    #[must_use]
    pub fn rejection(&self) -> Option<&RejectedAction> {
        match self {
            Self::Rejected(reason) => Some(reason),
            Self::ConsistencyFault(_) => None,
        }
    }
}

/// Errors building a session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 2x2, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },
    #[error("palette is empty")]
    EmptyPalette,
    #[error("max_seats {max_seats} must be between 2 and the palette size {palette}")]
    SeatLimit { max_seats: usize, palette: usize },
    #[error("cascade guard factor must be positive")]
    ZeroGuard,
    #[error("at least one human is required to start")]
    NoHumans,
    #[error("{count} humans exceed the seat limit of {max_seats}")]
    TooManyHumans { count: usize, max_seats: usize },
    #[error("{0} appears twice in the roster")]
    DuplicateHuman(PlayerId),
    #[error("invalid preset for cell {index}: {reason}")]
    InvalidPreset { index: usize, reason: &'static str },
}
