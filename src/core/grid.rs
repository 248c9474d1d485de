//! Grid topology and cell storage.
//!
//! Cells are indexed `0..N` row-major over a fixed `width × height`.
//!
//! ## Capacity
//!
//! A cell's capacity depends only on its position:
//! - Corner (top/bottom row AND left/right column): 1
//! - Other border cells: 2
//! - Interior: 3
//!
//! A cell holding more tokens than its capacity is unstable and detonates.
//!
//! ```
//! use chain_reaction::core::GridSpec;
//!
//! let spec = GridSpec::new(6, 10);
//! assert_eq!(spec.capacity_of(0), 1);  // corner
//! assert_eq!(spec.capacity_of(1), 2);  // top edge
//! assert_eq!(spec.capacity_of(7), 3);  // interior
//! assert_eq!(spec.neighbors(0).len(), 2);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::seat::SeatId;

/// Orthogonal neighbor list. Never more than four entries.
pub type Neighbors = SmallVec<[usize; 4]>;

/// Static grid topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
}

impl GridSpec {
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Maximum stable token count for the cell at `index`.
    #[must_use]
    pub const fn capacity_of(&self, index: usize) -> u8 {
        let total = self.cell_count();
        let top_or_bottom = index < self.width || index >= total - self.width;
        let left_or_right = index % self.width == 0 || (index + 1) % self.width == 0;

        match (top_or_bottom, left_or_right) {
            (true, true) => 1,
            (true, false) | (false, true) => 2,
            (false, false) => 3,
        }
    }

    /// Orthogonal neighbors of `index`, in top, bottom, right, left order.
    ///
    /// Rows do not wrap: column 0 has no left neighbor and the last
    /// column has no right neighbor.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> Neighbors {
        let mut out = Neighbors::new();
        let total = self.cell_count();

        if index >= self.width {
            out.push(index - self.width);
        }
        if index + self.width < total {
            out.push(index + self.width);
        }
        if (index + 1) % self.width != 0 {
            out.push(index + 1);
        }
        if index % self.width != 0 {
            out.push(index - 1);
        }

        out
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(6, 10)
    }
}

/// A single board cell.
///
/// Invariant: `owner.is_none() == (count == 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub owner: Option<SeatId>,
    pub count: u32,
    pub capacity: u8,
}

impl Cell {
    #[must_use]
    pub const fn empty(capacity: u8) -> Self {
        Self {
            owner: None,
            count: 0,
            capacity,
        }
    }

    /// True if the cell holds more tokens than it can keep.
    #[must_use]
    pub const fn is_unstable(&self) -> bool {
        self.count > self.capacity as u32
    }

    /// True if `seat` may place here (unowned or already its own).
    #[must_use]
    pub fn accepts(&self, seat: SeatId) -> bool {
        self.owner.map_or(true, |owner| owner == seat)
    }

    pub fn clear(&mut self) {
        self.owner = None;
        self.count = 0;
    }
}

/// Board contents over a fixed topology.
///
/// Cells live in a persistent vector so cloning the grid for a snapshot
/// is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    spec: GridSpec,
    cells: Vector<Cell>,
}

impl Grid {
    /// Create a zeroed grid.
    #[must_use]
    pub fn new(spec: GridSpec) -> Self {
        let cells = (0..spec.cell_count())
            .map(|i| Cell::empty(spec.capacity_of(i)))
            .collect();
        Self { spec, cells }
    }

    #[must_use]
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Iterate over `(index, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().enumerate()
    }

    /// The underlying cell vector.
    #[must_use]
    pub fn cells(&self) -> &Vector<Cell> {
        &self.cells
    }

    /// Number of cells owned by `seat`.
    #[must_use]
    pub fn owned_by(&self, seat: SeatId) -> usize {
        self.cells.iter().filter(|c| c.owner == Some(seat)).count()
    }

    /// Sum of all tokens on the board.
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.count)).sum()
    }

    /// Give every cell owned by `from` to `to`, keeping counts.
    pub fn reassign(&mut self, from: SeatId, to: SeatId) {
        for cell in self.cells.iter_mut() {
            if cell.owner == Some(from) {
                cell.owner = Some(to);
            }
        }
    }

    /// Empty every cell owned by `seat`.
    pub fn clear_owner(&mut self, seat: SeatId) {
        for cell in self.cells.iter_mut() {
            if cell.owner == Some(seat) {
                cell.clear();
            }
        }
    }
}
