//! # Play Command
//!
//! Interactive Spider Solitaire: the board is printed, one command is read
//! per line, and the game is saved after every command that changed it.
//!
//! ## Features
//!
//! - New game at a chosen level and seed, or `--resume` of the saved slot
//! - Input validation with clear error messages; refused moves are reported
//!   and play continues
//! - Auto-complete (`s`) paced by the configured delay
//! - Play time measured between commands and stored with the game
//! - Graceful quit with `q` or EOF; the game stays saved

use super::solve::run_autoplay;
use super::{load_saved, persist};
use crate::error::CliError;
use crate::formatters::{format_board, format_hint};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{PLAY_HELP, ParseResult, PlayCommand, parse_play_command};
use spider_engine::deck::Level;
use spider_engine::engine::{BoardState, Engine};
use spider_engine::errors::EngineError;
use spider_engine::persist::GameStore;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Settings for one `play` session, already merged from config and flags.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub level: Level,
    pub seed: Option<u64>,
    pub resume: bool,
    pub history_depth: usize,
    pub autoplay_delay: Duration,
}

/// Handle the play command: interactive game loop.
///
/// # Returns
///
/// * `Ok(())` when the user quits or input ends
/// * `Err(CliError)` if the saved game cannot be resumed or on I/O errors
///
/// Engine refusals (illegal move, empty stock, ...) are printed to `err` and
/// do not end the session.
pub fn handle_play_command(
    opts: &PlayOptions,
    store: &mut dyn GameStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut engine = if opts.resume {
        let engine = load_saved(store, opts.history_depth)?;
        writeln!(out, "play: resumed level={}", engine.level())?;
        engine
    } else {
        let seed = opts.seed.unwrap_or_else(rand::random);
        let engine = Engine::new(opts.level, Some(seed)).with_history_depth(opts.history_depth);
        store.clear()?;
        persist(store, &engine)?;
        writeln!(out, "play: level={} seed={}", opts.level, seed)?;
        engine
    };
    writeln!(out, "{}", PLAY_HELP)?;
    writeln!(out, "{}", format_board(&engine.state()))?;

    let mut clock = Instant::now();
    loop {
        ui::prompt(out, "> ")?;
        let Some(input) = read_stdin_line(stdin) else {
            break;
        };
        let secs = clock.elapsed().as_secs();
        if secs > 0 {
            engine.add_elapsed(secs);
            clock += Duration::from_secs(secs);
        }

        let command = match parse_play_command(&input) {
            ParseResult::Command(c) => c,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        match execute(&mut engine, command, opts.autoplay_delay, out) {
            Ok(Some(state)) => {
                writeln!(out, "{}", format_board(&state))?;
                persist(store, &engine)?;
            }
            Ok(None) => {}
            Err(CliError::Engine(e)) => report_refusal(err, &e)?,
            Err(e) => return Err(e),
        }
    }

    persist(store, &engine)?;
    writeln!(
        out,
        "Session: score={} moves={} sets={}",
        engine.score(),
        engine.move_count(),
        engine.completed_sets()
    )?;
    Ok(())
}

/// Runs one parsed command. Returns the new state when the board should be
/// reprinted and saved.
fn execute(
    engine: &mut Engine,
    command: PlayCommand,
    autoplay_delay: Duration,
    out: &mut dyn Write,
) -> Result<Option<BoardState>, CliError> {
    let state = match command {
        PlayCommand::Move { from, index, to } => engine.move_run(from, index, to)?,
        PlayCommand::Flip { column } => engine.flip(column)?,
        PlayCommand::Deal => engine.deal()?,
        PlayCommand::Undo => engine.undo()?,
        PlayCommand::Restart => engine.restart(),
        PlayCommand::Wand => engine.use_special_action()?,
        PlayCommand::Hint => {
            writeln!(out, "{}", format_hint(&engine.request_hint()))?;
            return Ok(None);
        }
        PlayCommand::Solve => {
            run_autoplay(engine, autoplay_delay, out)?;
            engine.state()
        }
    };
    Ok(Some(state))
}

fn report_refusal(err: &mut dyn Write, e: &EngineError) -> std::io::Result<()> {
    match e {
        EngineError::AlreadyWon => {
            ui::display_warning(err, "The game is won; use r to replay the deal or q to quit")
        }
        other => ui::write_error(err, &other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spider_engine::persist::MemoryStore;
    use std::io::Cursor;

    fn opts(seed: u64) -> PlayOptions {
        PlayOptions {
            level: Level::Beginner,
            seed: Some(seed),
            resume: false,
            history_depth: 20,
            autoplay_delay: Duration::ZERO,
        }
    }

    fn run_lines(
        opts: &PlayOptions,
        store: &mut MemoryStore,
        lines: &str,
    ) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new(lines.as_bytes().to_vec());
        let result = handle_play_command(opts, store, &mut out, &mut err, &mut input);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_play_quit_immediately_saves_new_game() {
        let mut store = MemoryStore::new();
        let (result, out, err) = run_lines(&opts(5), &mut store, "q\n");
        assert!(result.is_ok());
        assert!(out.contains("play: level=beginner seed=5"));
        assert!(out.contains("Score: 500"));
        assert!(err.is_empty());

        let saved = store.load().unwrap().expect("new game is saved");
        assert_eq!(saved.score, 500);
    }

    #[test]
    fn test_play_deal_then_undo() {
        let mut store = MemoryStore::new();
        let (result, out, _) = run_lines(&opts(5), &mut store, "d\nu\nq\n");
        result.unwrap();
        assert!(out.contains("Score: 495"));
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.stock.len(), 60);
        assert_eq!(saved.move_count, 0);
    }

    #[test]
    fn test_play_reports_refusals_and_continues() {
        let mut store = MemoryStore::new();
        let (result, _, err) = run_lines(&opts(5), &mut store, "m 0 0 1\nu\nbogus\nd\n");
        result.unwrap();
        assert!(err.contains("face down"), "stderr: {}", err);
        assert!(err.contains("Nothing to undo"), "stderr: {}", err);
        assert!(err.contains("Unrecognized"), "stderr: {}", err);
        assert_eq!(store.load().unwrap().unwrap().stock.len(), 52);
    }

    #[test]
    fn test_play_hint_does_not_change_game() {
        let mut store = MemoryStore::new();
        let (result, out, _) = run_lines(&opts(9), &mut store, "h\n");
        result.unwrap();
        assert!(out.contains("Hint:"));
        assert_eq!(store.load().unwrap().unwrap().move_count, 0);
    }

    #[test]
    fn test_play_wand_spends_a_charge() {
        let mut store = MemoryStore::new();
        let (result, out, _) = run_lines(&opts(3), &mut store, "w\n");
        result.unwrap();
        assert!(out.contains("Wands: 3"));
        assert_eq!(
            store.load().unwrap().unwrap().remaining_special_actions,
            3
        );
    }

    #[test]
    fn test_play_solve_before_end_game_is_refused() {
        let mut store = MemoryStore::new();
        let (result, _, err) = run_lines(&opts(3), &mut store, "s\n");
        result.unwrap();
        assert!(err.contains("Auto-complete"), "stderr: {}", err);
    }

    #[test]
    fn test_resume_continues_saved_game() {
        let mut store = MemoryStore::new();
        run_lines(&opts(8), &mut store, "d\nd\n").0.unwrap();

        let resume = PlayOptions {
            resume: true,
            ..opts(0)
        };
        let (result, out, _) = run_lines(&resume, &mut store, "q\n");
        result.unwrap();
        assert!(out.contains("play: resumed"));
        assert!(out.contains("Score: 490"));
    }

    #[test]
    fn test_resume_without_save_fails() {
        let mut store = MemoryStore::new();
        let resume = PlayOptions {
            resume: true,
            ..opts(0)
        };
        let (result, _, _) = run_lines(&resume, &mut store, "");
        assert!(matches!(result, Err(CliError::NoSavedGame)));
    }

    #[test]
    fn test_new_game_replaces_old_save() {
        let mut store = MemoryStore::new();
        run_lines(&opts(8), &mut store, "d\n").0.unwrap();
        run_lines(&opts(9), &mut store, "q\n").0.unwrap();
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.stock.len(), 60);
        assert_eq!(saved.columns, Engine::new(Level::Beginner, Some(9)).serialize().columns);
    }
}
