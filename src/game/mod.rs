//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The play loop drives it with ticks and commands; tests drive it directly.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{ConfigError, FoodPlacement, GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
