use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_LIVES: u8 = 3;
pub const DEFAULT_HINTS: u8 = 3;

/// Named board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub const fn board(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(9, 9, 10),
            Self::Normal => BoardConfig::new_unchecked(12, 12, 20),
            Self::Hard => BoardConfig::new_unchecked(16, 16, 40),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown difficulty {0:?}, expected one of easy, normal, hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}

impl From<Difficulty> for BoardConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.board()
    }
}

/// Everything needed to start a session: the board plus the lives and hints
/// each session begins with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardConfig,
    /// Mines a player may step on before losing; 1 ends the game on the first mine.
    pub starting_lives: u8,
    pub starting_hints: u8,
}

impl GameConfig {
    pub const fn new(board: BoardConfig, starting_lives: u8, starting_hints: u8) -> Self {
        Self {
            board,
            starting_lives,
            starting_hints,
        }
    }

    /// Single life and no hints.
    pub const fn classic(board: BoardConfig) -> Self {
        Self::new(board, 1, 0)
    }

    pub const fn with_board(self, board: BoardConfig) -> Self {
        Self { board, ..self }
    }

    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        self.board.validate()?;
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Difficulty::default().board(), DEFAULT_LIVES, DEFAULT_HINTS)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        Self::default().with_board(difficulty.board())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.board().validate(), Ok(()), "{difficulty}");
        }
        assert_eq!(Difficulty::Normal.board(), BoardConfig::new_unchecked(12, 12, 20));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn default_game_has_three_lives_and_hints() {
        let config = GameConfig::default();

        assert_eq!(config.board, Difficulty::Easy.board());
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.starting_hints, 3);
    }

    #[test]
    fn zero_lives_is_rejected() {
        let config = GameConfig::new(Difficulty::Easy.board(), 0, 3);
        assert_eq!(config.validate(), Err(ConfigError::NoLives));
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Normal).unwrap();
        assert_eq!(json, "\"normal\"");
    }
}
