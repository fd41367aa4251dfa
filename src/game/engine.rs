use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::{
    action::{Command, Direction},
    config::{FoodPlacement, GameConfig},
    state::{CollisionType, GameState, GameStatus, Position, Snake, grid_extent},
};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was paused or over; nothing changed
    Skipped,
    /// The snake advanced one cell
    Moved,
    /// The snake advanced onto the food and grew
    AteFood,
    /// The move was rejected and the game is over
    Collided(CollisionType),
}

impl TickOutcome {
    /// Returns true if this tick ended the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Collided(_))
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The state of the very first game, with the configured food cell
    pub fn initial_state(&self) -> GameState {
        GameState::new(self.initial_snake(), self.config.initial_food, self.config.grid_size)
    }

    /// Reset the game to the default snake, with freshly placed food
    pub fn reset(&mut self) -> GameState {
        let snake = self.initial_snake();
        let food = self.spawn_food(&snake);

        info!(food_x = food.x, food_y = food.y, "game reset");
        GameState::new(snake, food, self.config.grid_size)
    }

    /// Apply a command from the input handler. Returns true if the state
    /// changed.
    pub fn apply(&mut self, state: &mut GameState, command: Command) -> bool {
        match command {
            Command::Steer(direction) => self.steer(state, direction),
            Command::TogglePause => self.toggle_pause(state),
            Command::Reset => {
                *state = self.reset();
                true
            }
        }
    }

    /// Request a turn for the next tick.
    ///
    /// Requests are checked against the direction the snake last moved in,
    /// so several presses between two ticks can never add up to a reversal.
    /// The last accepted request wins.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        if state.is_game_over() {
            return false;
        }

        if state.snake.direction.is_opposite(direction) {
            trace!(?direction, current = ?state.snake.direction, "reversal rejected");
            return false;
        }

        state.pending_direction = Some(direction);
        true
    }

    /// Flip between running and paused. Has no effect once the game is over.
    pub fn toggle_pause(&self, state: &mut GameState) -> bool {
        state.status = match state.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::GameOver => return false,
        };

        debug!(status = ?state.status, "pause toggled");
        true
    }

    /// Execute one step of the game
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::Skipped;
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }

        // Calculate new head position
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        // Checked before the tail moves out of the way
        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver;
            state.steps += 1;

            info!(
                score = state.score,
                steps = state.steps,
                collision = ?collision_type,
                "game over"
            );
            return TickOutcome::Collided(collision_type);
        }

        let ate_food = new_head == state.food;

        // Move snake (grow if ate food)
        state.snake.move_snake(ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(&state.snake);

            debug!(
                score = state.score,
                food_x = state.food.x,
                food_y = state.food.y,
                "food eaten"
            );
            return TickOutcome::AteFood;
        }

        TickOutcome::Moved
    }

    fn initial_snake(&self) -> Snake {
        Snake::new(self.config.initial_head, self.config.initial_direction, 1)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick the next food cell according to the configured policy
    fn spawn_food(&mut self, snake: &Snake) -> Position {
        match self.config.food_placement {
            FoodPlacement::Uniform => self.random_cell(),
            FoodPlacement::AvoidSnake => {
                let size = grid_extent(self.config.grid_size);
                let free: Vec<Position> = (0..size)
                    .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
                    .filter(|pos| !snake.body.contains(pos))
                    .collect();

                match free.choose(&mut self.rng) {
                    Some(pos) => *pos,
                    None => self.random_cell(),
                }
            }
        }
    }

    fn random_cell(&mut self) -> Position {
        let size = grid_extent(self.config.grid_size);
        Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size))
    }
}
