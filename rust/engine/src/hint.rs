//! Heuristic move suggestions.
//!
//! Candidates are every column's full draggable run paired with every other
//! column that accepts it. Enumeration order is ascending source, then
//! ascending target, and the first candidate with the best score wins, so the
//! same board always yields the same hint.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::board::{Board, COLUMN_COUNT};
use crate::cards::Rank;
use crate::rules::{can_move, draggable_run};

/// How long a caller should keep a hint highlighted before clearing it.
pub const HINT_DISPLAY: Duration = Duration::from_secs(3);

const REVEAL_BONUS: u32 = 50;
const KING_TO_EMPTY_BONUS: u32 = 30;
const TO_EMPTY_BONUS: u32 = 10;
const PER_CARD: u32 = 5;
const KING_RUN_PER_CARD: u32 = 10;
const SAME_SUIT_BONUS: u32 = 20;

/// A suggested run move with its heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Source column
    pub from: usize,
    /// Index of the run's bottom card in the source column
    pub start: usize,
    /// Target column
    pub to: usize,
    /// Number of cards moved
    pub len: usize,
    /// Heuristic value; higher is better
    pub score: u32,
}

/// What the hint engine recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    /// Move a run
    Move(Move),
    /// No move exists, but this column's face-down top card can be turned
    Flip { column: usize },
    /// Nothing to suggest
    NoMovesAvailable,
}

/// Every legal whole-run move on the board, scored, in enumeration order.
pub fn enumerate_moves(board: &Board) -> Vec<Move> {
    let columns = board.columns();
    let mut moves = Vec::new();
    for from in 0..COLUMN_COUNT {
        let run = draggable_run(&columns[from]);
        if run.is_empty() {
            continue;
        }
        let cards = &columns[from][run.clone()];
        for to in 0..COLUMN_COUNT {
            if to == from || !can_move(cards, &columns[to]) {
                continue;
            }
            let mut mv = Move {
                from,
                start: run.start,
                to,
                len: run.len(),
                score: 0,
            };
            mv.score = score_move(board, &mv);
            moves.push(mv);
        }
    }
    moves
}

/// Additive heuristic for one candidate move.
pub(crate) fn score_move(board: &Board, mv: &Move) -> u32 {
    let columns = board.columns();
    let source = &columns[mv.from];
    let target = &columns[mv.to];
    let bottom = source[mv.start];
    let len = mv.len as u32;
    let king_headed = bottom.rank == Rank::King;

    let mut score = 0;
    if mv.start > 0 && !source[mv.start - 1].face_up {
        score += REVEAL_BONUS;
    }
    match target.last() {
        None if king_headed => score += KING_TO_EMPTY_BONUS,
        None => score += TO_EMPTY_BONUS,
        Some(top) if top.suit == bottom.suit => score += SAME_SUIT_BONUS,
        Some(_) => {}
    }
    score += PER_CARD * len;
    if king_headed && len > 1 {
        score += KING_RUN_PER_CARD * len;
    }
    score
}

/// Best move, else the first flippable column, else nothing.
pub fn best_hint(board: &Board) -> Hint {
    let mut best: Option<Move> = None;
    for mv in enumerate_moves(board) {
        match best {
            Some(b) if mv.score <= b.score => {}
            _ => best = Some(mv),
        }
    }
    if let Some(mv) = best {
        return Hint::Move(mv);
    }
    board
        .columns()
        .iter()
        .position(|pile| pile.last().is_some_and(|c| !c.face_up))
        .map_or(Hint::NoMovesAvailable, |column| Hint::Flip { column })
}
