use kaboom_core::{CellState, Clock, GameEngine, GamePhase, MineGenerator};

pub(crate) fn glyph(cell: CellState) -> char {
    match cell {
        CellState::Hidden => '#',
        CellState::Flagged => 'F',
        CellState::Revealed(0) => '.',
        CellState::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellState::RevealedMine { detonated: true } => 'X',
        CellState::RevealedMine { detonated: false } => '*',
    }
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::NotStarted => "ready",
        GamePhase::InProgress => "playing",
        GamePhase::Won => "won",
        GamePhase::Lost => "lost",
    }
}

pub(crate) fn status_line<G: MineGenerator, C: Clock>(engine: &GameEngine<G, C>) -> String {
    format!(
        "[{}] lives: {}  hints: {}  mines: {}  time: {}s",
        phase_label(engine.phase()),
        engine.lives_remaining(),
        engine.hints_remaining(),
        engine.mines_left(),
        engine.elapsed_seconds(),
    )
}

/// Board with row and column indices along the edges, followed by the status line.
pub(crate) fn render<G: MineGenerator, C: Clock>(engine: &GameEngine<G, C>) -> String {
    let (rows, cols) = engine.size();
    let width = rows.max(cols).saturating_sub(1).to_string().len();
    let mut out = format!("{:width$}", "");

    for col in 0..cols {
        out.push_str(&format!(" {col:>width$}"));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{row:>width$}"));
        for col in 0..cols {
            out.push_str(&format!(" {:>width$}", glyph(engine.cell_at((row, col)))));
        }
        out.push('\n');
    }

    out.push_str(&status_line(engine));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use kaboom_core::{BoardConfig, FixedMineGenerator, GameConfig, ManualClock};

    use super::*;

    #[test]
    fn glyphs_cover_every_state() {
        assert_eq!(glyph(CellState::Hidden), '#');
        assert_eq!(glyph(CellState::Flagged), 'F');
        assert_eq!(glyph(CellState::Revealed(0)), '.');
        assert_eq!(glyph(CellState::Revealed(8)), '8');
        assert_eq!(glyph(CellState::RevealedMine { detonated: true }), 'X');
        assert_eq!(glyph(CellState::RevealedMine { detonated: false }), '*');
    }

    #[test]
    fn renders_board_and_status() {
        let board = BoardConfig::new(2, 3, 1).unwrap();
        let generator = FixedMineGenerator::from_mine_coords((2, 3), &[(1, 2)]).unwrap();
        let mut engine =
            GameEngine::with_parts(GameConfig::new(board, 2, 1), generator, ManualClock::new(), 0)
                .unwrap();
        engine.reveal((0, 0)).unwrap();
        engine.toggle_flag((1, 2)).unwrap();

        let expected = "  0 1 2\n\
                        0 . 1 #\n\
                        1 . 1 F\n\
                        [playing] lives: 2  hints: 1  mines: 0  time: 0s\n";
        assert_eq!(render(&engine), expected);
    }
}
