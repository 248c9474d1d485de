//! Move selection for the filler seat.
//!
//! The filler only needs to keep a lone human company, so the shipped
//! policy picks uniformly among legal cells. Policies are trait-based so
//! hosts can plug in their own.

use crate::core::{GameRng, SeatId, SessionSnapshot};

/// Chooses the filler's next cell.
pub trait FillerPolicy {
    /// Pick a cell for `seat` from the snapshot, or `None` if no cell is legal.
    fn choose_cell(&self, snapshot: &SessionSnapshot, seat: SeatId, rng: &mut GameRng) -> Option<usize>;
}

/// Uniform choice over cells that are unowned or already the seat's own.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformRandomFiller;

impl FillerPolicy for UniformRandomFiller {
    fn choose_cell(&self, snapshot: &SessionSnapshot, seat: SeatId, rng: &mut GameRng) -> Option<usize> {
        let legal: Vec<usize> = snapshot.placeable_cells(seat).collect();
        rng.choose(&legal).copied()
    }
}
