//! Session configuration.
//!
//! Hosts configure a match at startup via `SessionConfig`. Defaults
//! describe the standard 6×10 board with a six-color palette.

use serde::{Deserialize, Serialize};

use super::grid::GridSpec;
use super::seat::{Color, DEFAULT_PALETTE};
use crate::error::ConfigError;

/// How cascades are driven after a placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeMode {
    /// The placement resolves the whole cascade before returning.
    #[default]
    Immediate,
    /// The host calls `advance_cascade` once per tick until settled.
    Paced,
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Board width in cells (at least 2).
    pub width: usize,

    /// Board height in cells (at least 2).
    pub height: usize,

    /// Seat colors in assignment order.
    pub palette: Vec<Color>,

    /// Maximum seats in rotation, filler included.
    pub max_seats: usize,

    /// Cascade driving mode.
    pub cascade_mode: CascadeMode,

    /// Cascade step guard per placement, as a multiple of the cell count.
    pub guard_factor: usize,

    /// Seed for the session RNG (filler moves).
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 6,
            height: 10,
            palette: DEFAULT_PALETTE.to_vec(),
            max_seats: DEFAULT_PALETTE.len(),
            cascade_mode: CascadeMode::Immediate,
            guard_factor: 3,
            seed: 42,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board dimensions.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the palette. `max_seats` is capped to the palette size.
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.max_seats = self.max_seats.min(palette.len());
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_max_seats(mut self, max_seats: usize) -> Self {
        self.max_seats = max_seats;
        self
    }

    #[must_use]
    pub fn with_cascade_mode(mut self, mode: CascadeMode) -> Self {
        self.cascade_mode = mode;
        self
    }

    /// Shorthand for `with_cascade_mode(CascadeMode::Paced)`.
    #[must_use]
    pub fn paced(self) -> Self {
        self.with_cascade_mode(CascadeMode::Paced)
    }

    #[must_use]
    pub fn with_guard_factor(mut self, factor: usize) -> Self {
        self.guard_factor = factor;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Grid topology described by this config.
    #[must_use]
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec::new(self.width, self.height)
    }

    /// Cascade steps allowed per placement.
    #[must_use]
    pub fn cascade_step_limit(&self) -> usize {
        self.guard_factor * self.width * self.height
    }

    /// Check the config describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.max_seats < 2 || self.max_seats > self.palette.len() {
            return Err(ConfigError::SeatLimit {
                max_seats: self.max_seats,
                palette: self.palette.len(),
            });
        }
        if self.guard_factor == 0 {
            return Err(ConfigError::ZeroGuard);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.grid_spec().cell_count(), 60);
        assert_eq!(config.cascade_step_limit(), 180);
        assert_eq!(config.max_seats, 6);
        assert_eq!(config.cascade_mode, CascadeMode::Immediate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new()
            .with_size(3, 4)
            .paced()
            .with_guard_factor(5)
            .with_seed(7)
            .with_max_seats(3);

        assert_eq!(config.grid_spec(), GridSpec::new(3, 4));
        assert_eq!(config.cascade_mode, CascadeMode::Paced);
        assert_eq!(config.cascade_step_limit(), 60);
        assert_eq!(config.seed, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_palette_caps_seats() {
        let config = SessionConfig::new().with_palette(DEFAULT_PALETTE[..3].to_vec());
        assert_eq!(config.max_seats, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        assert_eq!(
            SessionConfig::new().with_size(1, 5).validate(),
            Err(ConfigError::GridTooSmall { width: 1, height: 5 })
        );
        assert_eq!(
            SessionConfig::new().with_palette(Vec::new()).validate(),
            Err(ConfigError::EmptyPalette)
        );
        assert_eq!(
            SessionConfig::new().with_max_seats(9).validate(),
            Err(ConfigError::SeatLimit { max_seats: 9, palette: 6 })
        );
        assert_eq!(
            SessionConfig::new().with_max_seats(1).validate(),
            Err(ConfigError::SeatLimit { max_seats: 1, palette: 6 })
        );
        assert_eq!(
            SessionConfig::new().with_guard_factor(0).validate(),
            Err(ConfigError::ZeroGuard)
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = SessionConfig::new().with_size(4, 4).paced();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
