pub mod board;
pub mod renderer;

pub use board::{Board, Tile};
pub use renderer::Renderer;
