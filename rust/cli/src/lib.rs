//! # Spider CLI Library
//!
//! Terminal front end for the `spider-engine` Spider Solitaire engine. It
//! renders the board as text, reads one command per line, and keeps the game
//! in a single JSON save slot between runs.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["spider", "play", "--level", "intermediate", "--seed", "42"];
//! let code = spider_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play interactively (new game or `--resume`)
//! - `show`: Print the saved game
//! - `hint`: Print a hint for the saved game
//! - `solve`: Run auto-complete on the saved game
//! - `cfg`: Display current configuration settings
//! - `clear`: Delete the saved game

use clap::Parser;
use std::io::Write;
use std::time::Duration;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod store;
pub mod ui;
pub mod validation;

use cli::{Commands, SpiderCli};
use commands::{
    PlayOptions, handle_cfg_command, handle_clear_command, handle_hint_command,
    handle_play_command, handle_show_command, handle_solve_command,
};
use config::ConfigResolved;
use store::FileStore;

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand
/// handler. Configuration is resolved from defaults, `SPIDER_CONFIG`, and
/// `SPIDER_*` environment variables; flags win over all of them.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```no_run
/// use std::io;
/// let code = spider_cli::run(vec!["spider", "show"], &mut io::stdout(), &mut io::stderr());
/// assert!(code == 0 || code == 2);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SpiderCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = print_usage(err, &e);
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        cmd => run_with_config(cmd, out, err),
    };
    finish(result, err)
}

/// Resolves configuration, opens the save slot and runs `cmd`.
fn run_with_config(
    cmd: Commands,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let config = match config::load_with_sources() {
        Ok(ConfigResolved { config, .. }) => config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    let mut store = FileStore::new(config.save_path.clone());
    tracing::debug!(path = %store.path().display(), "using save slot");

    match cmd {
        Commands::Play {
            level,
            seed,
            resume,
        } => {
            let opts = PlayOptions {
                level: level.unwrap_or(config.level),
                seed: seed.or(config.seed),
                resume,
                history_depth: config.history_depth,
                autoplay_delay: Duration::from_millis(config.autoplay_delay_ms),
            };
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&opts, &mut store, out, err, &mut stdin_lock)
        }
        Commands::Show => handle_show_command(config.history_depth, &mut store, out),
        Commands::Hint => handle_hint_command(config.history_depth, &mut store, out),
        Commands::Solve { delay_ms } => handle_solve_command(
            Duration::from_millis(delay_ms.unwrap_or(config.autoplay_delay_ms)),
            config.history_depth,
            &mut store,
            out,
        ),
        Commands::Clear => handle_clear_command(&mut store, out),
        Commands::Cfg => handle_cfg_command(out, err),
    }
}

fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        // already reported where configuration was resolved
        Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn print_usage(err: &mut dyn Write, e: &clap::Error) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Spider Solitaire CLI")?;
    writeln!(err, "Usage: spider <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in Commands::NAMES {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: spider --help")
}
