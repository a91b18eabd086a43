//! Input parsing for the interactive `play` loop.
//!
//! One line is one command. Parsing only checks shape (known verb, right
//! number of non-negative integers); whether the command is legal is the
//! engine's call.

/// A command typed at the `play` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// `m <from> <index> <to>`
    Move {
        from: usize,
        index: usize,
        to: usize,
    },
    /// `f <col>`
    Flip { column: usize },
    /// `d`
    Deal,
    /// `u`
    Undo,
    /// `h`
    Hint,
    /// `s`: run auto-complete to the end
    Solve,
    /// `r`: restart the current deal
    Restart,
    /// `w`: spend a special action
    Wand,
}

/// Outcome of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered q or quit
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const PLAY_HELP: &str =
    "Commands: m <from> <index> <to>, f <col>, d, u, h, s, r, w, q";

/// Parse user input string into a [`PlayCommand`] or quit.
///
/// Verbs are case-insensitive and accept a long form (`move`, `flip`,
/// `deal`, `undo`, `hint`, `solve`, `restart`, `wand`, `quit`).
///
/// # Example
///
/// ```rust
/// # use spider_cli::validation::{parse_play_command, ParseResult, PlayCommand};
///
/// assert_eq!(
///     parse_play_command("m 0 4 3"),
///     ParseResult::Command(PlayCommand::Move { from: 0, index: 4, to: 3 })
/// );
/// assert_eq!(parse_play_command("Q"), ParseResult::Quit);
///
/// match parse_play_command("m 0 x 3") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("index")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_play_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some((&verb, args)) = parts.split_first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    let command = match verb {
        "q" | "quit" => return ParseResult::Quit,
        "m" | "move" => {
            if args.len() != 3 {
                return ParseResult::Invalid(
                    "Move takes three numbers (e.g., 'm 0 4 3')".to_string(),
                );
            }
            let from = match parse_index(args[0], "source column") {
                Ok(v) => v,
                Err(msg) => return ParseResult::Invalid(msg),
            };
            let index = match parse_index(args[1], "card index") {
                Ok(v) => v,
                Err(msg) => return ParseResult::Invalid(msg),
            };
            let to = match parse_index(args[2], "target column") {
                Ok(v) => v,
                Err(msg) => return ParseResult::Invalid(msg),
            };
            PlayCommand::Move { from, index, to }
        }
        "f" | "flip" => {
            if args.len() != 1 {
                return ParseResult::Invalid("Flip takes a column (e.g., 'f 2')".to_string());
            }
            match parse_index(args[0], "column") {
                Ok(column) => PlayCommand::Flip { column },
                Err(msg) => return ParseResult::Invalid(msg),
            }
        }
        "d" | "deal" => PlayCommand::Deal,
        "u" | "undo" => PlayCommand::Undo,
        "h" | "hint" => PlayCommand::Hint,
        "s" | "solve" => PlayCommand::Solve,
        "r" | "restart" => PlayCommand::Restart,
        "w" | "wand" => PlayCommand::Wand,
        other => {
            return ParseResult::Invalid(format!(
                "Unrecognized command '{}'. {}",
                other, PLAY_HELP
            ));
        }
    };

    let takes_args = matches!(command, PlayCommand::Move { .. } | PlayCommand::Flip { .. });
    if !takes_args && !args.is_empty() {
        return ParseResult::Invalid(format!("'{}' takes no arguments", verb));
    }
    ParseResult::Command(command)
}

fn parse_index(s: &str, what: &str) -> Result<usize, String> {
    s.parse::<usize>()
        .map_err(|_| format!("Invalid {} '{}'", what, s))
}
