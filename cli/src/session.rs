use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Context;
use kaboom_core::{
    Clock, GameEngine, GamePhase, HintOutcome, MineGenerator, RevealEffect, RevealOutcome,
};

use crate::command::{Command, HELP};
use crate::render::render;

/// Reads commands until `q` or end of input, redrawing after every move that
/// changed the board.
pub(crate) fn run<G, C, R, W>(
    engine: &mut GameEngine<G, C>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    G: MineGenerator,
    C: Clock,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", render(engine))?;
    prompt(out)?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            prompt(out)?;
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                log::debug!("Command: {:?}", command);
                if execute(engine, command, out)?.is_break() {
                    return Ok(());
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        prompt(out)?;
    }

    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> anyhow::Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn execute<G, C, W>(
    engine: &mut GameEngine<G, C>,
    command: Command,
    out: &mut W,
) -> anyhow::Result<ControlFlow<()>>
where
    G: MineGenerator,
    C: Clock,
    W: Write,
{
    let phase_before = engine.phase();

    let updated = match command {
        Command::Reveal(coords) => match engine.reveal(coords) {
            Ok(outcome) => {
                report_reveal(&outcome, engine.lives_remaining(), out)?;
                outcome.has_update()
            }
            Err(err) => {
                writeln!(out, "error: {err}")?;
                false
            }
        },
        Command::Flag(coords) => match engine.toggle_flag(coords) {
            Ok(outcome) => {
                if !outcome.has_update() {
                    writeln!(out, "Nothing to flag there.")?;
                }
                outcome.has_update()
            }
            Err(err) => {
                writeln!(out, "error: {err}")?;
                false
            }
        },
        Command::Hint => match engine.use_hint() {
            Ok(outcome) => {
                report_hint(&outcome, engine.lives_remaining(), out)?;
                outcome.has_update()
            }
            Err(err) => {
                writeln!(out, "error: {err}")?;
                false
            }
        },
        Command::New(Some(difficulty)) => {
            engine.change_difficulty(difficulty)?;
            writeln!(out, "New {difficulty} game.")?;
            true
        }
        Command::New(None) => {
            engine.restart();
            writeln!(out, "New game.")?;
            true
        }
        Command::Dump => {
            let json = serde_json::to_string_pretty(&engine.snapshot())?;
            writeln!(out, "{json}")?;
            false
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            false
        }
        Command::Quit => return Ok(ControlFlow::Break(())),
    };

    engine.tick();
    if updated {
        report_phase(phase_before, engine, out)?;
        write!(out, "{}", render(engine))?;
    }
    Ok(ControlFlow::Continue(()))
}

fn report_hint<W: Write>(outcome: &HintOutcome, lives: u8, out: &mut W) -> anyhow::Result<()> {
    match outcome {
        HintOutcome::Revealed(outcome) => report_reveal(outcome, lives, out)?,
        HintOutcome::Exhausted => writeln!(out, "No hints left.")?,
        HintOutcome::NoSafeCellAvailable => writeln!(out, "No safe cell left to hint.")?,
        HintOutcome::GameOver => writeln!(out, "The game is over, type n for a new one.")?,
    }
    Ok(())
}

fn report_reveal<W: Write>(outcome: &RevealOutcome, lives: u8, out: &mut W) -> anyhow::Result<()> {
    match outcome.effect {
        RevealEffect::NoChange if outcome.phase.is_terminal() => {
            writeln!(out, "The game is over, type n for a new one.")?
        }
        RevealEffect::NoChange => writeln!(out, "Nothing to open there.")?,
        RevealEffect::HitMine => writeln!(out, "Boom! {lives} lives left.")?,
        _ => {}
    }
    Ok(())
}

fn report_phase<G: MineGenerator, C: Clock, W: Write>(
    before: GamePhase,
    engine: &GameEngine<G, C>,
    out: &mut W,
) -> anyhow::Result<()> {
    if before.is_terminal() {
        return Ok(());
    }
    match engine.phase() {
        GamePhase::Won => writeln!(out, "Board cleared in {}s!", engine.elapsed_seconds())?,
        GamePhase::Lost => writeln!(out, "Out of lives, game over.")?,
        GamePhase::NotStarted | GamePhase::InProgress => {}
    }
    Ok(())
}
