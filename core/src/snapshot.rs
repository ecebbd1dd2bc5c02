use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end shows, detached from the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub lives: u8,
    pub hints: u8,
    pub elapsed_seconds: u32,
    pub mines_left: i32,
    pub revealed_safe_count: CellCount,
    pub cells: Array2<CellState>,
}

impl Snapshot {
    pub fn from_engine<G: MineGenerator, C: Clock>(engine: &GameEngine<G, C>) -> Self {
        let size = engine.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            engine.cell_at((row as Coord, col as Coord))
        });

        Self {
            config: *engine.config(),
            phase: engine.phase(),
            lives: engine.lives_remaining(),
            hints: engine.hints_remaining(),
            elapsed_seconds: engine.elapsed_seconds(),
            mines_left: engine.mines_left(),
            revealed_safe_count: engine.revealed_safe_count(),
            cells,
        }
    }
}
