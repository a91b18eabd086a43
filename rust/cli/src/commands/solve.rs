//! # Solve Command
//!
//! Runs terminal-phase auto-complete on the saved game, printing each step,
//! then saves the result. The same loop backs the `s` command inside `play`.

use super::{load_saved, persist};
use crate::error::CliError;
use crate::formatters::{format_board, format_step};
use spider_engine::engine::Engine;
use spider_engine::persist::GameStore;
use spider_engine::solver::StepOutcome;
use std::io::Write;
use std::time::Duration;

/// Upper bound on steps in one run; a game never needs close to this many.
const MAX_STEPS: usize = 1_000;

pub fn handle_solve_command(
    delay: Duration,
    history_depth: usize,
    store: &mut dyn GameStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut engine = load_saved(store, history_depth)?;
    let result = run_autoplay(&mut engine, delay, out);
    persist(store, &engine)?;
    result?;
    writeln!(out, "{}", format_board(&engine.state()))?;
    Ok(())
}

/// Steps the solver until it stalls or wins, sleeping `delay` between steps.
///
/// Returns the final outcome. Fails with the engine's `SolverUnavailable`
/// before taking any step if the end game has not been reached.
pub(crate) fn run_autoplay(
    engine: &mut Engine,
    delay: Duration,
    out: &mut dyn Write,
) -> Result<StepOutcome, CliError> {
    let mut last = StepOutcome::Stalled;
    for i in 0..MAX_STEPS {
        if i > 0 && !delay.is_zero() {
            std::thread::sleep(delay);
        }
        last = engine.step()?;
        writeln!(out, "{}", format_step(&last))?;
        if matches!(last, StepOutcome::Stalled | StepOutcome::Won) {
            break;
        }
    }
    tracing::info!(outcome = ?last, score = engine.score(), "auto-complete finished");
    Ok(last)
}
