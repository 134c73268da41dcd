//! Tunable parameters of a cave system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::placement::RESERVED_CAVES;

/// Number of grid rows used by the classic layout.
pub const DEFAULT_ROWS: u32 = 4;
/// Number of grid columns used by the classic layout.
pub const DEFAULT_COLUMNS: u32 = 5;
/// Arrows granted at the start of a session.
pub const DEFAULT_ARROWS: u32 = 5;
/// Caves an arrow can travel through before it drops.
pub const DEFAULT_ARROW_RANGE: usize = 5;
/// Probability that a missed shot wakes the Wumpus.
pub const DEFAULT_WAKE_CHANCE: f64 = 0.2;
/// Largest cave system a configuration may describe.
pub const MAX_CAVES: u32 = 10_000;

/// Configuration for building a [`World`](crate::World).
///
/// Every field falls back to its default when omitted from a serialized
/// configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub columns: u32,
    /// Arrows granted when a session starts.
    pub initial_arrows: u32,
    /// Maximum number of caves an arrow path may name; extra steps are dropped.
    pub max_arrow_path: usize,
    /// Probability in `[0, 1]` that a clean miss wakes the Wumpus.
    pub wumpus_wake_chance: f64,
    /// Seed for the session's random number generator. Drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            initial_arrows: DEFAULT_ARROWS,
            max_arrow_path: DEFAULT_ARROW_RANGE,
            wumpus_wake_chance: DEFAULT_WAKE_CHANCE,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Returns the configuration with a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configuration with a different starting quiver.
    #[must_use]
    pub fn with_initial_arrows(mut self, initial_arrows: u32) -> Self {
        self.initial_arrows = initial_arrows;
        self
    }

    /// Returns the configuration with a different Wumpus wake probability.
    #[must_use]
    pub fn with_wake_chance(mut self, chance: f64) -> Self {
        self.wumpus_wake_chance = chance;
        self
    }

    /// Checks that a world can be built from the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::ZeroDimension {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let available = self
            .rows
            .checked_mul(self.columns)
            .filter(|caves| *caves <= MAX_CAVES)
            .ok_or(ConfigError::TooManyCaves {
                rows: self.rows,
                columns: self.columns,
            })?;
        if available < RESERVED_CAVES {
            return Err(ConfigError::TooFewCaves { available });
        }

        if self.max_arrow_path == 0 {
            return Err(ConfigError::ZeroArrowRange);
        }

        if !(0.0..=1.0).contains(&self.wumpus_wake_chance) {
            return Err(ConfigError::InvalidWakeChance {
                chance: self.wumpus_wake_chance,
            });
        }

        Ok(())
    }
}

/// Reasons a world could not be built.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The grid has no rows or no columns.
    #[error("cave grid must be at least 1x1, got {rows}x{columns}")]
    ZeroDimension {
        /// Configured rows.
        rows: u32,
        /// Configured columns.
        columns: u32,
    },
    /// The grid cannot host the Wumpus, two pits, two bat colonies and the player.
    #[error("cave grid holds {available} caves but at least six are required")]
    TooFewCaves {
        /// Caves in the configured grid.
        available: u32,
    },
    /// The grid holds more than [`MAX_CAVES`] caves.
    #[error("cave grid of {rows}x{columns} exceeds the limit of 10000 caves")]
    TooManyCaves {
        /// Configured rows.
        rows: u32,
        /// Configured columns.
        columns: u32,
    },
    /// Arrows could not leave the player's cave.
    #[error("arrow range must allow at least one cave")]
    ZeroArrowRange,
    /// The wake probability lies outside `[0, 1]`.
    #[error("wumpus wake chance {chance} must lie within [0, 1]")]
    InvalidWakeChance {
        /// Configured probability.
        chance: f64,
    },
    /// An explicit layout overlaps itself or names caves outside the grid.
    #[error("placement must name six distinct caves inside the grid")]
    InvalidPlacement,
}
