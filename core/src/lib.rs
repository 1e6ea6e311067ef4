pub mod board;
pub mod session;

pub use board::{Board, Cell, TileKind, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TILE_KINDS};
pub use session::{Phase, Removal, Session};
