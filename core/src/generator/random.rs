use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform placement over every cell except the first opened one, without
/// replacement.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, board: &BoardConfig, safe: Coord2) -> MineLayout {
        let size = board.size();
        let total_cells = usize::from(board.total_cells());
        let free_cells = total_cells.saturating_sub(1);

        let mut mines = usize::from(board.mines);
        if mines > free_cells {
            log::warn!(
                "Cannot keep start cell safe with {} mines on {} cells, placing {}",
                mines,
                total_cells,
                free_cells
            );
            mines = free_cells;
        }

        // sample among every cell but the safe one, then shift indices past it
        let safe_index = linear_index(safe, size);
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for sampled in index::sample(&mut self.rng, free_cells, mines) {
            let cell_index = if sampled >= safe_index {
                sampled + 1
            } else {
                sampled
            };
            mine_mask[from_linear_index(cell_index, size).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Placed {} mines on {}x{} board, start cell {:?}",
            layout.mine_count(),
            size.0,
            size.1,
            safe
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_and_spares_start_cell() {
        let board = Difficulty::Hard.board();
        let mut generator = RandomMineGenerator::new(7);

        for safe in [(0, 0), (8, 8), (15, 15), (3, 12)] {
            let layout = generator.generate(&board, safe);
            assert_eq!(layout.mine_count(), board.mines);
            assert!(!layout.contains_mine(safe));
            assert!(layout.fits(&board, safe));
        }
    }

    #[test]
    fn densest_board_fills_everything_but_start() {
        let board = BoardConfig::new_unchecked(3, 3, 8);
        let layout = RandomMineGenerator::new(1).generate(&board, (1, 1));

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 1)));
    }

    #[test]
    fn same_seed_same_layout() {
        let board = Difficulty::Normal.board();
        let a = RandomMineGenerator::new(42).generate(&board, (5, 5));
        let b = RandomMineGenerator::new(42).generate(&board, (5, 5));

        assert_eq!(a, b);
    }

    #[test]
    fn every_other_cell_can_hold_a_mine() {
        let board = BoardConfig::new_unchecked(2, 2, 1);
        let mut generator = RandomMineGenerator::new(3);
        let mut seen = [false; 4];

        for _ in 0..200 {
            let layout = generator.generate(&board, (0, 0));
            for (row, col) in layout.iter_mines() {
                seen[linear_index((row, col), board.size())] = true;
            }
        }

        assert_eq!(seen, [false, true, true, true]);
    }
}
