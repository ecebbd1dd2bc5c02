use thiserror::Error;

use crate::{CellCount, Coord2};

/// Reasons a board or game configuration is rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines: {mines} requested, at most {max} fit")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("Game needs at least one life")]
    NoLives,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Coordinates {coords:?} are out of bounds for a {size:?} board")]
    CoordinateOutOfBounds { coords: Coord2, size: Coord2 },
    #[error("Generated mine layout does not match the board configuration")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
