//! # chain-reaction
//!
//! Authoritative game state machine for a turn-based chain-reaction grid
//! game.
//!
//! Seats take turns placing tokens on a rectangular grid. A cell that
//! holds more tokens than its capacity detonates, pushing one token into
//! each orthogonal neighbor and capturing it. Detonations chain until the
//! board settles. Seats that have placed and no longer own any cell are
//! eliminated; the last seat standing wins.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The session never spawns work or keeps time. Hosts
//!    submit actions one at a time and read snapshots back.
//!
//! 2. **All or Nothing**: An action either applies fully or is rejected
//!    with a typed reason and the state untouched.
//!
//! 3. **Same Board Either Way**: Cascades can resolve inside the placing
//!    call or one detonation per `advance_cascade`; the outcome is identical.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Cells live in an `im::Vector`, so
//!   snapshots share structure with the live board.
//!
//! - **Filler Seat**: A lone human is paired with a computer-controlled
//!   filler seat, retired again when a second human joins.
//!
//! ## Modules
//!
//! - `core`: Seats, grid, configuration, actions, state, RNG
//! - `cascade`: Detonation queue and step guard
//! - `rules`: Turn rotation, elimination and results
//! - `seats`: Joining and leaving mid-game
//! - `session`: The action surface hosts talk to
//! - `ai`: Move selection for the filler seat
//! - `error`: Rejection and configuration errors

pub mod core;
pub mod error;
pub mod cascade;
pub mod rules;
pub mod seats;
pub mod session;
pub mod ai;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, SeatId, Seat, Color, DEFAULT_PALETTE,
    Cell, Grid, GridSpec,
    GameRng,
    CascadeMode, SessionConfig,
    Action, ActionRecord,
    SessionSnapshot, SessionState,
};

pub use crate::error::{ConfigError, RejectedAction, SessionError};

pub use crate::cascade::{CascadeEngine, CascadeStatus, StepOutcome};

pub use crate::rules::{GameReport, GameResult, Standing};

pub use crate::seats::{JoinKind, LeaveKind, RosterChange};

pub use crate::session::{ActionOutcome, Session, SessionBuilder};

pub use crate::ai::{FillerPolicy, UniformRandomFiller};
