use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Direction;
use super::state::{Position, grid_extent};

/// Largest accepted grid side length
pub const MAX_GRID_SIZE: usize = 1024;

/// How a new food cell is chosen after the snake eats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPlacement {
    /// Any cell of the grid, even one under the snake
    #[default]
    Uniform,
    /// A free cell; falls back to `Uniform` when the snake fills the grid
    AvoidSnake,
}

/// Errors produced while loading or checking a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid_size must be at least 1")]
    EmptyGrid,

    #[error("grid_size {size} exceeds the maximum of {max}")]
    GridTooLarge { size: usize, max: usize },

    #[error("tick_interval_ms must be positive")]
    ZeroTickInterval,

    #[error("{what} ({x}, {y}) lies outside a {size}x{size} grid")]
    OutOfGrid {
        what: &'static str,
        x: i32,
        y: i32,
        size: usize,
    },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
    /// Where the single-segment snake starts
    pub initial_head: Position,
    pub initial_direction: Direction,
    /// Food cell of the very first game; later games place food randomly
    pub initial_food: Position,
    pub food_placement: FoodPlacement,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tick_interval_ms: 150,
            initial_head: Position::new(10, 10),
            initial_direction: Direction::Right,
            initial_food: Position::new(5, 5),
            food_placement: FoodPlacement::Uniform,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size.
    ///
    /// The start and food cells are moved to the same relative spots of the
    /// new grid so they stay inside it.
    pub fn new(grid_size: usize) -> Self {
        let size = grid_extent(grid_size);
        Self {
            grid_size,
            initial_head: Position::new(size / 2, size / 2),
            initial_food: Position::new(size / 4, size / 4),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30)
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        for (what, pos) in [
            ("initial_head", self.initial_head),
            ("initial_food", self.initial_food),
        ] {
            if !pos.is_within(self.grid_size) {
                return Err(ConfigError::OutOfGrid {
                    what,
                    x: pos.x,
                    y: pos.y,
                    size: self.grid_size,
                });
            }
        }

        Ok(())
    }

    /// The tick period as a [`std::time::Duration`]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}
