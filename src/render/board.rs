//! Pure projection of game state onto a grid of tiles

use crate::game::{GameState, Position};

/// What a single grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Head,
    Body,
    Food,
}

/// Row-major snapshot of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Project the state. The head is always visible; food that spawned under
    /// the body is drawn over it.
    pub fn from_state(state: &GameState) -> Self {
        let size = state.grid_size;
        let mut board = Self {
            size,
            tiles: vec![Tile::Empty; size * size],
        };

        for segment in state.snake.body_segments() {
            board.set(*segment, Tile::Body);
        }
        board.set(state.food, Tile::Food);
        board.set(state.snake.head(), Tile::Head);

        board
    }

    /// Tile at `(x, y)`; cells outside the grid read as empty
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        if x < self.size && y < self.size {
            self.tiles[y * self.size + x]
        } else {
            Tile::Empty
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        // chunks(0) panics; an empty grid has no rows either way
        self.tiles.chunks(self.size.max(1))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    fn set(&mut self, pos: Position, tile: Tile) {
        // off-grid cells have no tile
        if pos.is_within(self.size) {
            let idx = pos.y as usize * self.size + pos.x as usize;
            self.tiles[idx] = tile;
        }
    }
}
