//! Turn rotation, elimination and match results.
//!
//! The session calls into these after every settled placement, after every
//! cascade step and after every departure. Results are stored on the
//! `SessionState`; nothing here holds state of its own.

pub mod outcome;
pub mod turn;

pub use outcome::{GameReport, GameResult, Standing};
pub use turn::{
    advance_turn, apply_eliminations, check_game_end, end_turn, next_live_seat, pass_from_eliminated,
};
