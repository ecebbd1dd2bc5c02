use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use cell::*;
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod clock;
mod config;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

/// Board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// Requires a non-empty board with at least one mine and one safe cell.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.mines == 0 {
            return Err(ConfigError::NoMines);
        }
        let max = self.total_cells() - 1;
        if self.mines > max {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                max,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.rows && coords.1 < self.cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::CoordinateOutOfBounds {
                coords,
                size: self.size(),
            })
        }
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

/// Fixed placement of mines on a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::CoordinateOutOfBounds { coords, size });
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Whether this layout can back a session on `board` whose first opened
    /// cell is `safe`.
    pub fn fits(&self, board: &BoardConfig, safe: Coord2) -> bool {
        self.size() == board.size()
            && self.mine_count == board.mines
            && board.contains(safe)
            && !self[safe]
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealEffect {
    NoChange,
    Revealed,
    /// Stepped on a mine but lives remain.
    HitMine,
    Won,
    Lost,
}

impl RevealEffect {
    pub const fn has_update(self) -> bool {
        use RevealEffect::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
            Lost => true,
        }
    }
}

/// Cells touched by an opening action, most of which change a single cell.
pub type ChangedCells = SmallVec<[Coord2; 8]>;

/// Result of an opening action: what happened, which cells need redrawing and
/// the phase the session ended up in.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealOutcome {
    pub effect: RevealEffect,
    pub changed: ChangedCells,
    pub phase: GamePhase,
}

impl RevealOutcome {
    pub(crate) fn no_change(phase: GamePhase) -> Self {
        Self {
            effect: RevealEffect::NoChange,
            changed: ChangedCells::new(),
            phase,
        }
    }

    pub fn has_update(&self) -> bool {
        self.effect.has_update()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HintOutcome {
    Revealed(RevealOutcome),
    /// No hints left this session.
    Exhausted,
    /// Every safe cell is already open or flagged.
    NoSafeCellAvailable,
    /// The session already ended.
    GameOver,
}

impl HintOutcome {
    pub fn has_update(&self) -> bool {
        matches!(self, Self::Revealed(outcome) if outcome.has_update())
    }
}
