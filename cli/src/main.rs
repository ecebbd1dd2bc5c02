use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kaboom_core::{Difficulty, GameEngine};

mod command;
mod render;
mod session;
mod settings;

use settings::{FileSettings, Overrides, Settings};

/// Minesweeper in the terminal, with lives and hints.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board preset: easy, normal or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Lives per game, 1 ends the game on the first mine
    #[arg(short, long)]
    lives: Option<u8>,

    /// Hints per game
    #[arg(long)]
    hints: Option<u8>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let file = match &args.config {
        Some(path) => FileSettings::load(path)?,
        None => FileSettings::default(),
    };
    let overrides = Overrides {
        difficulty: args.difficulty,
        lives: args.lives,
        hints: args.hints,
        seed: args.seed,
    };
    let settings = Settings::resolve(file, overrides);

    let mut engine = match settings.seed {
        Some(seed) => GameEngine::with_seed(settings.game, seed),
        None => GameEngine::new(settings.game),
    }
    .context("Could not start a game")?;
    log::debug!("App started");

    session::run(&mut engine, io::stdin().lock(), &mut io::stdout().lock())
}
