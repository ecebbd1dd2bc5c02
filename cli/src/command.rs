use std::str::FromStr;

use kaboom_core::{Coord, Coord2, Difficulty, ParseDifficultyError};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Hint,
    /// New game, optionally switching difficulty.
    New(Option<Difficulty>),
    Dump,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  r <row> <col>            reveal a cell
  f <row> <col>            toggle a flag
  h                        use a hint
  n [easy|normal|hard]     new game, optionally changing difficulty
  dump                     print the game state as JSON
  ?                        show this help
  q                        quit";

#[derive(Error, Debug, PartialEq)]
pub(crate) enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type ? for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unexpected argument {0:?}")]
    TrailingInput(String),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
}

fn parse_coord(word: &str) -> Result<Coord, ParseCommandError> {
    word.parse()
        .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, ParseCommandError> {
    let (Some(row), Some(col)) = (words.next(), words.next()) else {
        return Err(ParseCommandError::MissingCoords);
    };
    Ok((parse_coord(row)?, parse_coord(col)?))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "h" | "hint" => Command::Hint,
            "n" | "new" => Command::New(words.next().map(str::parse::<Difficulty>).transpose()?),
            "dump" => Command::Dump,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}
