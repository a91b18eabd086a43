//! Card, board, hint and solver-step formatters for terminal display.
//!
//! Pure functions over engine values. Suits render as Unicode symbols with
//! an ASCII fallback for terminals that cannot show them.
//!
//! ## Example
//!
//! ```rust
//! use spider_engine::cards::{Card, Rank, Suit};
//! use spider_cli::formatters::{format_card, format_column};
//!
//! let ten = Card::face_up(Suit::Hearts, Rank::Ten);
//! assert!(format_card(&ten) == "10♥" || format_card(&ten) == "10h");
//!
//! let hidden = Card::new(Suit::Spades, Rank::Two);
//! assert!(format_column(&[hidden, ten]).starts_with("## 10"));
//! ```

use spider_engine::board::SETS_TO_WIN;
use spider_engine::cards::{Card, Rank, Suit};
use spider_engine::engine::BoardState;
use spider_engine::hint::Hint;
use spider_engine::solver::StepOutcome;

/// Placeholder for a face-down card.
pub const HIDDEN: &str = "##";

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM), or VS Code (VSCODE_INJECTION). On Unix-like systems,
/// assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Rank as `A`, `2`..`10`, `J`, `Q`, `K`.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ace => "A".to_string(),
        Rank::Jack => "J".to_string(),
        Rank::Queen => "Q".to_string(),
        Rank::King => "K".to_string(),
        other => other.value().to_string(),
    }
}

/// Face-up cards show rank and suit; face-down cards show [`HIDDEN`].
pub fn format_card(card: &Card) -> String {
    if card.face_up {
        format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
    } else {
        HIDDEN.to_string()
    }
}

/// A column bottom card first, or `--` when empty.
pub fn format_column(cards: &[Card]) -> String {
    if cards.is_empty() {
        "--".to_string()
    } else {
        let formatted: Vec<String> = cards.iter().map(format_card).collect();
        formatted.join(" ")
    }
}

pub fn format_header(state: &BoardState) -> String {
    format!(
        "Level: {}  Score: {}  Moves: {}  Sets: {}/{}  Deals left: {}  Wands: {}",
        state.level,
        state.score,
        state.move_count,
        state.completed_sets,
        SETS_TO_WIN,
        state.deals_remaining,
        state.special_actions
    )
}

/// Header plus one line per column, prefixed by the column index.
pub fn format_board(state: &BoardState) -> String {
    let mut lines = vec![format_header(state)];
    for (i, column) in state.columns.iter().enumerate() {
        lines.push(format!("{}: {}", i, format_column(column)));
    }
    if state.won {
        lines.push("You won!".to_string());
    } else if state.can_auto_complete {
        lines.push("Auto-complete available (s)".to_string());
    }
    lines.join("\n")
}

pub fn format_hint(hint: &Hint) -> String {
    match hint {
        Hint::Move(mv) => format!(
            "Hint: move {} card{} from column {} (index {}) to column {}",
            mv.len,
            if mv.len == 1 { "" } else { "s" },
            mv.from,
            mv.start,
            mv.to
        ),
        Hint::Flip { column } => format!("Hint: flip the top card of column {}", column),
        Hint::NoMovesAvailable => "Hint: no moves available".to_string(),
    }
}

pub fn format_step(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Moved { from, to, len } => {
            format!("auto: moved {} from column {} to column {}", len, from, to)
        }
        StepOutcome::Completed { column, card } => format!(
            "auto: completed {} set from column {}",
            format_suit(&card.suit),
            column
        ),
        StepOutcome::Stalled => "auto: no further progress".to_string(),
        StepOutcome::Won => "auto: all sets complete".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spider_engine::deck::Level;
    use spider_engine::engine::Engine;

    #[test]
    fn test_format_rank() {
        assert_eq!(format_rank(&Rank::Ace), "A");
        assert_eq!(format_rank(&Rank::Ten), "10");
        assert_eq!(format_rank(&Rank::Seven), "7");
        assert_eq!(format_rank(&Rank::King), "K");
    }

    #[test]
    fn test_face_down_card_is_hidden() {
        assert_eq!(format_card(&Card::new(Suit::Hearts, Rank::Ace)), HIDDEN);
    }

    #[test]
    fn test_format_empty_column() {
        assert_eq!(format_column(&[]), "--");
    }

    #[test]
    fn test_format_board_has_header_and_eight_columns() {
        let state = Engine::new(Level::Beginner, Some(3)).state();
        let text = format_board(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains("Score: 500"));
        assert!(lines[0].contains("Deals left: 8"));
        assert!(lines[0].contains("Wands: 4"));
        assert!(lines[1].starts_with("0: ## ## ## ## ## "));
    }

    #[test]
    fn test_format_hint_variants() {
        assert_eq!(
            format_hint(&Hint::Flip { column: 2 }),
            "Hint: flip the top card of column 2"
        );
        assert!(format_hint(&Hint::NoMovesAvailable).contains("no moves"));
    }
}
