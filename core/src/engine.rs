use std::collections::VecDeque;

use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No cell opened yet, mines not placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Won or lost, no further move has any effect
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single-player session and the only owner of its state.
///
/// Mines are placed on the first opened cell (by [`reveal`](Self::reveal) or
/// [`use_hint`](Self::use_hint)) so that cell is always safe. Front ends drive
/// the engine with actions, read it back through queries, and call
/// [`tick`](Self::tick) about once a second to refresh the timer.
#[derive(Clone, Debug)]
pub struct GameEngine<G = RandomMineGenerator, C = SystemClock> {
    config: GameConfig,
    board: Array2<CellState>,
    mine_layout: Option<MineLayout>,
    phase: GamePhase,
    lives: u8,
    hints: u8,
    revealed_safe_count: CellCount,
    flag_count: CellCount,
    started_at: Option<Instant>,
    elapsed_secs: u32,
    generator: G,
    clock: C,
    rng: SmallRng,
}

impl GameEngine {
    /// Engine with OS-seeded randomness and the system clock.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_parts(
            config,
            RandomMineGenerator::from_os_rng(),
            SystemClock,
            rand::random(),
        )
    }

    /// Reproducible engine: same seed and moves give the same layouts and hints.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_parts(
            config,
            RandomMineGenerator::new(seed),
            SystemClock,
            seed.rotate_left(32),
        )
    }
}

impl<G: MineGenerator, C: Clock> GameEngine<G, C> {
    pub fn with_parts(config: GameConfig, generator: G, clock: C, hint_seed: u64) -> Result<Self> {
        config.validate()?;
        log::debug!("New engine with {:?}", config);
        Ok(Self {
            config,
            board: Array2::default(config.board.size().to_nd_index()),
            mine_layout: None,
            phase: GamePhase::NotStarted,
            lives: config.starting_lives,
            hints: config.starting_hints,
            revealed_safe_count: 0,
            flag_count: 0,
            started_at: None,
            elapsed_secs: 0,
            generator,
            clock,
            rng: SmallRng::seed_from_u64(hint_seed),
        })
    }

    /// Discards the current session and starts an empty one with `config`.
    ///
    /// An invalid configuration is rejected and the current session is kept.
    pub fn reset(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.restart();
        Ok(())
    }

    /// Starts over with the current configuration.
    pub fn restart(&mut self) {
        let config = self.config;
        self.board = Array2::default(config.board.size().to_nd_index());
        self.mine_layout = None;
        self.phase = GamePhase::NotStarted;
        self.lives = config.starting_lives;
        self.hints = config.starting_hints;
        self.revealed_safe_count = 0;
        self.flag_count = 0;
        self.started_at = None;
        self.elapsed_secs = 0;
        log::debug!("Session reset with {:?}", config);
    }

    /// New session on another board, keeping the lives and hints settings.
    pub fn change_difficulty(&mut self, board: impl Into<BoardConfig>) -> Result<()> {
        self.reset(self.config.with_board(board.into()))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board_config(&self) -> &BoardConfig {
        &self.config.board
    }

    pub fn size(&self) -> Coord2 {
        self.config.board.size()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn lives_remaining(&self) -> u8 {
        self.lives
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_clock_running(&self) -> bool {
        self.phase.is_in_progress()
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.board.mines) - i32::from(self.flag_count)
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.config.board.validate_coords(coords)?;
        Ok(self.cell_at(coords))
    }

    /// Unchecked variant of [`cell_state`](Self::cell_state), panics out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    /// Placed mines, `None` until the first cell is opened.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.board.validate_coords(coords)?;

        if self.phase.is_terminal() || !self.cell_at(coords).is_hidden() {
            return Ok(RevealOutcome::no_change(self.phase));
        }

        self.ensure_mines(coords)?;
        Ok(self.open_cell(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.config.board.validate_coords(coords)?;

        if self.phase.is_terminal() {
            return Ok(NoChange);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        Ok(match *cell {
            Hidden => {
                *cell = Flagged;
                self.flag_count += 1;
                Changed
            }
            Flagged => {
                *cell = Hidden;
                self.flag_count -= 1;
                Changed
            }
            Revealed(_) | RevealedMine { .. } => NoChange,
        })
    }

    /// Opens a random safe cell that is neither open nor flagged.
    ///
    /// Before the first move any unflagged cell qualifies and becomes the
    /// start cell for mine placement.
    pub fn use_hint(&mut self) -> Result<HintOutcome> {
        if self.phase.is_terminal() {
            return Ok(HintOutcome::GameOver);
        }
        if self.hints == 0 {
            return Ok(HintOutcome::Exhausted);
        }

        let candidates: Vec<Coord2> = self
            .config
            .board
            .iter_coords()
            .filter(|&pos| self.board[pos.to_nd_index()].is_hidden())
            .filter(|&pos| {
                self.mine_layout
                    .as_ref()
                    .is_none_or(|layout| !layout.contains_mine(pos))
            })
            .collect();

        let Some(&target) = candidates.choose(&mut self.rng) else {
            log::debug!("No safe cell left for a hint");
            return Ok(HintOutcome::NoSafeCellAvailable);
        };

        self.ensure_mines(target)?;
        self.hints -= 1;
        log::debug!("Hint opens {:?}, {} hints left", target, self.hints);
        Ok(HintOutcome::Revealed(self.open_cell(target)))
    }

    /// Refreshes the elapsed time from the start stamp while the game runs.
    pub fn tick(&mut self) {
        if self.phase.is_in_progress() {
            self.update_elapsed();
        }
    }

    fn update_elapsed(&mut self) {
        if let Some(started_at) = self.started_at {
            let secs = self
                .clock
                .now()
                .saturating_duration_since(started_at)
                .as_secs();
            let secs = u32::try_from(secs).unwrap_or(u32::MAX);
            self.elapsed_secs = self.elapsed_secs.max(secs);
        }
    }

    /// Places mines around `safe` on the first opening move.
    fn ensure_mines(&mut self, safe: Coord2) -> Result<()> {
        if self.mine_layout.is_some() {
            return Ok(());
        }

        let layout = self.generator.generate(&self.config.board, safe);
        if !layout.fits(&self.config.board, safe) {
            log::warn!(
                "Rejected mine layout of size {:?} with {} mines for {:?}, start cell {:?}",
                layout.size(),
                layout.mine_count(),
                self.config.board,
                safe
            );
            return Err(GameError::InvalidLayout);
        }

        self.mine_layout = Some(layout);
        self.phase = GamePhase::InProgress;
        self.started_at = Some(self.clock.now());
        self.elapsed_secs = 0;
        log::debug!("Game started at {:?}", safe);
        Ok(())
    }

    /// Opens a hidden cell, flood-filling from zero cells. Requires placed mines.
    fn open_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(layout) = self.mine_layout.as_ref() else {
            return RevealOutcome::no_change(self.phase);
        };
        let mut changed = ChangedCells::new();

        if layout.contains_mine(coords) {
            self.board[coords.to_nd_index()] = CellState::RevealedMine { detonated: true };
            changed.push(coords);
            self.lives = self.lives.saturating_sub(1);
            log::debug!("Hit mine at {:?}, {} lives left", coords, self.lives);

            if self.lives == 0 {
                self.finish(GamePhase::Lost, &mut changed);
                return self.outcome(RevealEffect::Lost, changed);
            }
            return self.outcome(RevealEffect::HitMine, changed);
        }

        let size = layout.size();
        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            // flagged and already opened cells stop the cascade
            if !self.board[visit_coords.to_nd_index()].is_hidden() {
                continue;
            }

            let adjacent_mines = layout.adjacent_mine_count(visit_coords);
            self.board[visit_coords.to_nd_index()] = CellState::Revealed(adjacent_mines);
            self.revealed_safe_count += 1;
            changed.push(visit_coords);
            log::trace!("Opened {:?}, mine count: {}", visit_coords, adjacent_mines);

            if adjacent_mines == 0 {
                to_visit.extend(
                    NeighborIter::new(visit_coords, size)
                        .filter(|&pos| self.board[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        if self.revealed_safe_count == self.config.board.safe_cells() {
            self.finish(GamePhase::Won, &mut changed);
            self.outcome(RevealEffect::Won, changed)
        } else {
            self.outcome(RevealEffect::Revealed, changed)
        }
    }

    /// Enters a terminal phase: stops the clock and shows the mines.
    ///
    /// A loss also uncovers flagged mines, a win leaves the flags in place.
    fn finish(&mut self, phase: GamePhase, changed: &mut ChangedCells) {
        self.update_elapsed();
        self.phase = phase;

        if let Some(layout) = &self.mine_layout {
            for pos in layout.iter_mines() {
                let cell = &mut self.board[pos.to_nd_index()];
                match *cell {
                    CellState::Hidden => {}
                    CellState::Flagged if phase == GamePhase::Lost => {
                        self.flag_count -= 1;
                    }
                    _ => continue,
                }
                *cell = CellState::RevealedMine { detonated: false };
                changed.push(pos);
            }
        }
        log::debug!("Game ended {:?} after {}s", phase, self.elapsed_secs);
    }

    fn outcome(&self, effect: RevealEffect, changed: ChangedCells) -> RevealOutcome {
        RevealOutcome {
            effect,
            changed,
            phase: self.phase,
        }
    }
}
