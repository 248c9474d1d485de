//! Seat identification and per-seat data.
//!
//! ## PlayerId
//!
//! Opaque identifier the host assigns to a human participant.
//!
//! ## SeatId
//!
//! A slot in turn rotation, bound either to a human or to the AI filler.
//! The filler is a distinct variant rather than a reserved player value,
//! so no human identifier can ever alias it.

use serde::{Deserialize, Serialize};

/// Host-assigned identifier for a human participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Seat identifier: a human or the (single) AI filler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatId {
    /// Seat controlled by a human participant.
    Human(PlayerId),
    /// Automatically controlled seat that stands in when only one human remains.
    Filler,
}

impl SeatId {
    /// Shorthand for a human seat.
    #[must_use]
    pub const fn human(id: u32) -> Self {
        Self::Human(PlayerId(id))
    }

    #[must_use]
    pub const fn is_filler(self) -> bool {
        matches!(self, Self::Filler)
    }

    /// The human behind this seat, if any.
    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Self::Human(id) => Some(id),
            Self::Filler => None,
        }
    }
}

impl From<PlayerId> for SeatId {
    fn from(id: PlayerId) -> Self {
        Self::Human(id)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human(id) => write!(f, "{id}"),
            Self::Filler => write!(f, "Filler"),
        }
    }
}

/// Display color for a seat, stored as packed `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    #[must_use]
    pub const fn rgb(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Fixed palette seats draw from, in assignment order.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::rgb(0x39FF14),
    Color::rgb(0xFF1D58),
    Color::rgb(0xFF7A00),
    Color::rgb(0xF7FF00),
    Color::rgb(0x00C9A7),
    Color::rgb(0xF400A1),
];

/// Per-seat record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub color: Color,
    pub is_eliminated: bool,
    /// Set on the seat's first placement. Seats that never placed are
    /// exempt from elimination.
    pub has_ever_placed: bool,
}

impl Seat {
    /// Create a fresh seat.
    #[must_use]
    pub fn new(id: SeatId, color: Color) -> Self {
        Self {
            id,
            color,
            is_eliminated: false,
            has_ever_placed: false,
        }
    }
}

/// First palette color for which `in_use` returns false.
pub fn first_unused_color(palette: &[Color], in_use: impl Fn(Color) -> bool) -> Option<Color> {
    palette.iter().copied().find(|&c| !in_use(c))
}
