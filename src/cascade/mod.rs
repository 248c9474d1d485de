//! Cascade (detonation) processing.
//!
//! When a cell holds more tokens than its capacity it is queued. Each
//! step detonates one queued cell: the cell empties, and every orthogonal
//! neighbor gains one token and takes the detonating cell's owner.
//! Neighbors pushed over capacity are queued in turn.
//!
//! Each neighbor gains exactly one token no matter how far the cell
//! overflowed, so tokens beyond `capacity + 1` are discarded.
//!
//! ## Guard
//!
//! Steps are counted per placement. Once the count passes the configured
//! limit, `step` refuses to detonate and reports `StepOutcome::Halted`;
//! the session then abandons the cascade.
//!
//! ## Driving
//!
//! The engine only ever performs one step per call. Whether a placement
//! runs every step before returning or the host calls in at its own
//! cadence is decided by the session, and both yield the same board.
//!
//! ```
//! use chain_reaction::cascade::{CascadeEngine, StepOutcome};
//! use chain_reaction::core::{Grid, GridSpec, SeatId};
//!
//! let spec = GridSpec::new(3, 3);
//! let mut grid = Grid::new(spec);
//! let mut engine = CascadeEngine::new(spec.cell_count(), 27);
//!
//! // Corner holds 2 tokens, capacity 1
//! let cell = grid.get_mut(0).unwrap();
//! cell.owner = Some(SeatId::human(1));
//! cell.count = 2;
//! engine.notify_increment(&grid, 0);
//!
//! let outcome = engine.step(&mut grid);
//! assert!(matches!(outcome, StepOutcome::Detonated { index: 0, .. }));
//! assert!(engine.is_settled());
//! assert_eq!(grid.owned_by(SeatId::human(1)), 2);
//! ```

mod queue;

pub use queue::CascadeQueue;

use serde::{Deserialize, Serialize};

use crate::core::grid::{Grid, Neighbors};
use crate::core::seat::SeatId;

/// Result of a single `CascadeEngine::step` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing was queued.
    Idle,
    /// The dequeued cell no longer overflowed.
    Skipped { index: usize },
    /// The cell detonated into `neighbors`.
    Detonated {
        index: usize,
        owner: SeatId,
        neighbors: Neighbors,
    },
    /// The step limit was exceeded. Nothing was processed.
    Halted,
}

/// Cascade state reported to the host after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeStatus {
    /// No detonations pending.
    Settled,
    /// Detonations remain; the host must call `advance_cascade`.
    Pending(usize),
    /// The step guard tripped and the cascade was abandoned.
    Halted,
}

/// Pending-detonation queue plus the per-placement step guard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeEngine {
    queue: CascadeQueue,
    steps: usize,
    limit: usize,
}

impl CascadeEngine {
    /// Create an engine for `cell_count` cells allowing `limit` steps per placement.
    #[must_use]
    pub fn new(cell_count: usize, limit: usize) -> Self {
        Self {
            queue: CascadeQueue::new(cell_count),
            steps: 0,
            limit,
        }
    }

    /// Start a new placement's step budget.
    pub fn reset_guard(&mut self) {
        self.steps = 0;
    }

    /// Queue `index` if it now exceeds capacity.
    pub fn notify_increment(&mut self, grid: &Grid, index: usize) {
        if grid.get(index).is_some_and(|c| c.is_unstable()) {
            self.queue.push(index);
        }
    }

    /// Process one pending detonation.
    pub fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        if self.queue.is_empty() {
            return StepOutcome::Idle;
        }

        self.steps += 1;
        if self.steps > self.limit {
            return StepOutcome::Halted;
        }

        let Some(index) = self.queue.pop() else {
            return StepOutcome::Idle;
        };

        let owner = match grid.get_mut(index) {
            Some(cell) if cell.is_unstable() => match cell.owner {
                Some(owner) => {
                    cell.clear();
                    owner
                }
                None => return StepOutcome::Skipped { index },
            },
            _ => return StepOutcome::Skipped { index },
        };

        let neighbors = grid.spec().neighbors(index);
        for &n in &neighbors {
            if let Some(cell) = grid.get_mut(n) {
                cell.count += 1;
                cell.owner = Some(owner);
            }
            self.notify_increment(grid, n);
        }

        StepOutcome::Detonated {
            index,
            owner,
            neighbors,
        }
    }

    /// Drop queued cells that no longer overflow.
    pub fn purge_settled(&mut self, grid: &Grid) {
        self.queue
            .retain(|i| grid.get(i).is_some_and(|c| c.is_unstable()));
    }

    /// Abandon all pending detonations.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued detonations.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Steps taken since the last placement.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn queue(&self) -> &CascadeQueue {
        &self.queue
    }

    /// Status as seen by the host.
    #[must_use]
    pub fn status(&self) -> CascadeStatus {
        if self.queue.is_empty() {
            CascadeStatus::Settled
        } else {
            CascadeStatus::Pending(self.queue.len())
        }
    }
}
