//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! any error to exit code `2` after printing it.

use spider_engine::errors::{EngineError, StoreError};
use std::fmt;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (save file, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// A command the engine refused
    Engine(EngineError),

    /// Save slot could not be read or written
    Store(StoreError),

    /// Command needs a saved game and the slot is empty
    NoSavedGame,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "{}", e),
            CliError::Store(e) => write!(f, "Save slot error: {}", e),
            CliError::NoSavedGame => write!(f, "No saved game; start one with `spider play`"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<EngineError> for CliError {
    fn from(error: EngineError) -> Self {
        CliError::Engine(error)
    }
}

impl From<StoreError> for CliError {
    fn from(error: StoreError) -> Self {
        CliError::Store(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn engine_errors_display_unwrapped() {
        let e = CliError::from(EngineError::HistoryEmpty);
        assert_eq!(e.to_string(), "Nothing to undo");
        assert!(e.source().is_some());
    }

    #[test]
    fn no_saved_game_points_at_play() {
        assert!(CliError::NoSavedGame.to_string().contains("spider play"));
    }
}
