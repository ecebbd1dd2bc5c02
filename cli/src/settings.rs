use std::fs;
use std::path::Path;

use anyhow::Context;
use kaboom_core::{BoardConfig, DEFAULT_HINTS, DEFAULT_LIVES, Difficulty, GameConfig};
use serde::Deserialize;

/// Optional TOML settings file. Every key may be omitted.
///
/// ```toml
/// difficulty = "normal"
/// lives = 1
/// hints = 0
/// seed = 42
///
/// # custom board, takes precedence over `difficulty`
/// [board]
/// rows = 20
/// cols = 30
/// mines = 99
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileSettings {
    pub difficulty: Option<Difficulty>,
    pub board: Option<BoardConfig>,
    pub lives: Option<u8>,
    pub hints: Option<u8>,
    pub seed: Option<u64>,
}

impl FileSettings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Values given on the command line, each overriding the settings file.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    pub difficulty: Option<Difficulty>,
    pub lives: Option<u8>,
    pub hints: Option<u8>,
    pub seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Settings {
    pub game: GameConfig,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn resolve(file: FileSettings, overrides: Overrides) -> Self {
        let board = match (overrides.difficulty, file.board, file.difficulty) {
            (Some(difficulty), _, _) => difficulty.board(),
            (None, Some(board), _) => board,
            (None, None, difficulty) => difficulty.unwrap_or_default().board(),
        };
        let game = GameConfig::new(
            board,
            overrides.lives.or(file.lives).unwrap_or(DEFAULT_LIVES),
            overrides.hints.or(file.hints).unwrap_or(DEFAULT_HINTS),
        );
        let seed = overrides.seed.or(file.seed);
        log::debug!("Resolved settings: {:?}, seed {:?}", game, seed);

        Self { game, seed }
    }
}
