//! Session builder with optional preset cells.
//!
//! Presets let a host (or a test) start from a prepared board instead of
//! an empty one. They do not count as placements, so a seat that only
//! holds preset cells is still exempt from elimination.

use crate::core::{GameRng, PlayerId, SeatId, SessionConfig, SessionState};
use crate::error::ConfigError;

use super::Session;

/// A cell to fill before the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Preset {
    index: usize,
    seat: SeatId,
    count: u32,
}

/// Builder for a `Session`.
#[derive(Clone, Debug, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    humans: Vec<PlayerId>,
    presets: Vec<Preset>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a human in join order.
    pub fn human(mut self, id: u32) -> Self {
        self.humans.push(PlayerId::new(id));
        self
    }

    pub fn humans(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.humans.extend(ids.into_iter().map(PlayerId::new));
        self
    }

    /// Give `seat` `count` tokens on cell `index`.
    ///
    /// `count` must be between 1 and the cell's capacity.
    pub fn preset_cell(mut self, index: usize, seat: SeatId, count: u32) -> Self {
        self.presets.push(Preset { index, seat, count });
        self
    }

    pub fn build(self) -> Result<Session, ConfigError> {
        let mut state = SessionState::new(&self.config, &self.humans)?;

        for preset in &self.presets {
            apply_preset(&mut state, preset)?;
        }

        let rng = GameRng::new(self.config.seed);
        Ok(Session {
            config: self.config,
            state,
            rng,
        })
    }
}

fn apply_preset(state: &mut SessionState, preset: &Preset) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidPreset {
        index: preset.index,
        reason,
    };

    if state.seat(preset.seat).is_none() {
        return Err(invalid("seat is not seated"));
    }
    let cell = state
        .grid
        .get_mut(preset.index)
        .ok_or_else(|| invalid("cell out of range"))?;

    if preset.count == 0 {
        return Err(invalid("count must be positive"));
    }
    if preset.count > u32::from(cell.capacity) {
        return Err(invalid("count exceeds capacity"));
    }

    cell.owner = Some(preset.seat);
    cell.count = preset.count;
    Ok(())
}
