//! Match results and the terminal report.

use serde::{Deserialize, Serialize};

use crate::core::seat::{PlayerId, SeatId};

/// Result of a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single surviving seat.
    Winner(SeatId),
    /// Every remaining seat was eliminated at once.
    Draw,
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: SeatId) -> bool {
        matches!(self, GameResult::Winner(w) if *w == seat)
    }

    #[must_use]
    pub fn winner(&self) -> Option<SeatId> {
        match self {
            GameResult::Winner(seat) => Some(*seat),
            GameResult::Draw => None,
        }
    }
}

/// Final standing of a human seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    Won,
    Lost,
}

/// Terminal report: every seated human mapped to a standing.
///
/// The filler seat never appears.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    /// Humans in seat order.
    pub standings: Vec<(PlayerId, Standing)>,
}

impl GameReport {
    /// Build a report for `humans` under `result`.
    pub fn new(result: &GameResult, humans: impl IntoIterator<Item = PlayerId>) -> Self {
        let standings = humans
            .into_iter()
            .map(|id| {
                let standing = if result.is_winner(SeatId::Human(id)) {
                    Standing::Won
                } else {
                    Standing::Lost
                };
                (id, standing)
            })
            .collect();
        Self { standings }
    }

    #[must_use]
    pub fn standing(&self, id: PlayerId) -> Option<Standing> {
        self.standings
            .iter()
            .find(|(p, _)| *p == id)
            .map(|(_, s)| *s)
    }
}
