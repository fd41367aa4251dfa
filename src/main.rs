use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{FoodPlacement, GameConfig};
use grid_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Single-screen Snake game for the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between two moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Where new food may appear
    #[arg(long, value_enum)]
    food_placement: Option<Placement>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Placement {
    /// Anywhere on the grid, even under the snake
    Uniform,
    /// Only on cells the snake does not cover
    AvoidSnake,
}

impl From<Placement> for FoodPlacement {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Uniform => FoodPlacement::Uniform,
            Placement::AvoidSnake => FoodPlacement::AvoidSnake,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            // Start cells that no longer fit move to the resized grid's defaults
            let resized = GameConfig::new(grid_size);
            if !config.initial_head.is_within(grid_size) {
                config.initial_head = resized.initial_head;
            }
            if !config.initial_food.is_within(grid_size) {
                config.initial_food = resized.initial_food;
            }
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(placement) = self.food_placement.clone() {
            config.food_placement = placement.into();
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// The TUI owns the terminal, so logs only go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "grid_snake=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_snake::game::{Direction, Position};
    use std::io::Write;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["grid_snake"]);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "grid_snake",
            "--grid-size",
            "12",
            "--tick-ms",
            "90",
            "--food-placement",
            "avoid-snake",
        ]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.food_placement, FoodPlacement::AvoidSnake);
        assert!(config.initial_head.is_within(12));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "initial_head": {{ "x": 3, "y": 4 }}, "initial_food": {{ "x": 15, "y": 15 }}, "tick_interval_ms": 80, "initial_direction": "down" }}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["grid_snake", "--config", path, "--grid-size", "12", "--tick-ms", "60"]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.tick_interval_ms, 60);
        assert_eq!(config.initial_direction, Direction::Down);
        // Still fits, so it is kept
        assert_eq!(config.initial_head, Position::new(3, 4));
        // Off the 12x12 grid, so it moves
        assert_eq!(config.initial_food, GameConfig::new(12).initial_food);

        let cli = Cli::parse_from(["grid_snake", "--config", path]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.initial_food, Position::new(15, 15));
        assert_eq!(config.tick_interval_ms, 80);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let cli = Cli::parse_from(["grid_snake", "--grid-size", "4294967316"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let cli = Cli::parse_from(["grid_snake", "--tick-ms", "0"]);
        assert!(cli.game_config().is_err());
    }
}
