use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places mines for a session once the first cell to open is known.
pub trait MineGenerator {
    /// Returns a layout for `board` that must leave `safe` free of mines.
    fn generate(&mut self, board: &BoardConfig, safe: Coord2) -> MineLayout;
}
