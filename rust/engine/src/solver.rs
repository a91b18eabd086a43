//! Terminal-phase auto-complete.
//!
//! Once the stock is empty and nothing is face down, finishing the game is
//! mechanical: lift completed sets, and slide runs onto same-suit successors.
//! This module only plans a single step; the engine commits it. There is no
//! search and no backtracking.

use std::time::Duration;

use crate::board::{Board, COLUMN_COUNT};
use crate::cards::Card;
use crate::rules::{draggable_run, has_completed_set_on_top};

/// Suggested pause between steps when a caller animates auto-complete.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(200);

/// Lifecycle of an auto-complete run, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverState {
    /// No step taken since the last manual command
    #[default]
    Idle,
    /// Last step made progress
    Running,
    /// Last step found nothing to do; manual play may continue
    Stalled,
    /// All sets completed
    Done,
}

/// Result of one solver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A run slid from one column onto another
    Moved { from: usize, to: usize, len: usize },
    /// A completed set was lifted to the foundation
    Completed { column: usize, card: Card },
    /// Nothing left to do
    Stalled,
    /// The game is won
    Won,
}

/// The single action a step will commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverAction {
    RemoveSet { column: usize },
    Relocate { from: usize, start: usize, to: usize },
}

/// Stock empty and every tableau card face up.
pub fn is_terminal_phase(board: &Board) -> bool {
    board.stock().is_empty() && board.all_face_up()
}

/// Picks the next action, or `None` when the board is stuck.
///
/// Completed sets come first (lowest column wins). Otherwise the lowest source
/// column whose top run can land on a same-suit card one rank higher moves to
/// the lowest such target.
pub fn plan_step(board: &Board) -> Option<SolverAction> {
    let columns = board.columns();
    if let Some(column) = (0..COLUMN_COUNT).find(|&i| has_completed_set_on_top(&columns[i])) {
        return Some(SolverAction::RemoveSet { column });
    }

    for from in 0..COLUMN_COUNT {
        let run = draggable_run(&columns[from]);
        if run.is_empty() {
            continue;
        }
        let bottom = columns[from][run.start];
        let target = (0..COLUMN_COUNT).filter(|&to| to != from).find(|&to| {
            columns[to]
                .last()
                .is_some_and(|top| bottom.continues_run_on(top) && top.face_up)
        });
        if let Some(to) = target {
            return Some(SolverAction::Relocate {
                from,
                start: run.start,
                to,
            });
        }
    }
    None
}
