//! Action representation and history records.
//!
//! Every mutation of a session comes from one `Action`. Accepted actions
//! are recorded so a session can be replayed from its config and roster.

use serde::{Deserialize, Serialize};

use super::seat::{PlayerId, SeatId};

/// An externally submitted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a token. `seat` is `SeatId::Filler` for filler moves.
    Place { seat: SeatId, cell: usize },
    /// Process one pending detonation.
    AdvanceCascade,
    /// A human joined the session.
    Join(PlayerId),
    /// A seat left the session.
    Leave(SeatId),
}

/// An accepted action with its position in the session history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Completed rounds when the action was taken.
    pub round: u32,

    /// Sequence number within the session.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, round: u32, sequence: u32) -> Self {
        Self {
            action,
            round,
            sequence,
        }
    }
}
