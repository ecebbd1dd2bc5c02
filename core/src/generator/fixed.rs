use super::*;

/// Always hands out the same layout, for puzzles and reproducible scenarios.
///
/// The engine still checks the layout against the board and the first opened
/// cell, and refuses to start if it does not fit.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    layout: MineLayout,
}

impl FixedMineGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, _board: &BoardConfig, _safe: Coord2) -> MineLayout {
        self.layout.clone()
    }
}
