//! Grid Snake - a single-screen Snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session counters (metrics module)
//! - The interactive play loop and its tick timer (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
