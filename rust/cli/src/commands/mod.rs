//! Command handler modules for the Spider CLI.
//!
//! Each subcommand lives in its own file with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: output streams (`&mut dyn Write`), input
//!   (`&mut dyn BufRead`) and the save slot (`&mut dyn GameStore`) are passed in
//! - Error propagation: all errors propagated via `CliError`
//!
//! # Example
//!
//! ```rust,ignore
//! use spider_cli::commands::handle_show_command;
//! use spider_engine::persist::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! let mut out = Vec::new();
//! handle_show_command(20, &mut store, &mut out)?;
//! ```

mod cfg;
mod clear;
mod hint;
mod play;
mod show;
mod solve;

pub use cfg::handle_cfg_command;
pub use clear::handle_clear_command;
pub use hint::handle_hint_command;
pub use play::{PlayOptions, handle_play_command};
pub use show::handle_show_command;
pub use solve::handle_solve_command;

use crate::error::CliError;
use spider_engine::engine::Engine;
use spider_engine::persist::GameStore;

/// Resumes the game in the save slot.
fn load_saved(store: &dyn GameStore, history_depth: usize) -> Result<Engine, CliError> {
    let record = store.load()?.ok_or(CliError::NoSavedGame)?;
    Ok(Engine::from_record(&record)?.with_history_depth(history_depth))
}

/// Saves an unfinished game; a won game empties the slot instead.
fn persist(store: &mut dyn GameStore, engine: &Engine) -> Result<(), CliError> {
    if engine.is_won() {
        store.clear()?;
    } else {
        store.save(&engine.serialize())?;
    }
    Ok(())
}
