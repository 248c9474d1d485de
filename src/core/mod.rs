//! Core engine types: seats, grid, configuration, actions, state, RNG.
//!
//! These are the building blocks every other module works on. The grid
//! topology is fixed per session; everything else lives in `SessionState`.

pub mod seat;
pub mod grid;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use seat::{Color, PlayerId, Seat, SeatId, DEFAULT_PALETTE};
pub use grid::{Cell, Grid, GridSpec, Neighbors};
pub use rng::GameRng;
pub use config::{CascadeMode, SessionConfig};
pub use action::{Action, ActionRecord};
pub use state::{SessionSnapshot, SessionState};
