//! Seat management: humans joining and leaving mid-game.
//!
//! Keeps exactly zero or one filler seat in rotation, substituting it
//! when the human population drops to one and retiring it when another
//! human arrives.

mod manager;

pub use manager::{join, leave, JoinKind, LeaveKind, RosterChange};
