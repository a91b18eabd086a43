//! Saved-game record, its validation, and the storage port.
//!
//! A [`SavedGame`] is the full resumable state of one game, plus the initial
//! deal so "restart this deal" survives a reload. Records are plain serde
//! structs; stores encode them as JSON. Decoding never trusts a record: card
//! counts and composition are checked before anything is loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::board::{Board, COLUMN_COUNT, SETS_TO_WIN};
use crate::cards::{all_ranks, Card, Rank, Suit};
use crate::deck::{Level, DECK_SIZE};
use crate::errors::{EngineError, StoreError};
use crate::scoring::Tracker;

/// Identifier of the single save slot.
pub const SAVE_KEY: &str = "spider-solitaire-save";

/// Column and stock contents as first dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialDeal {
    pub columns: Vec<Vec<Card>>,
    pub stock: Vec<Card>,
}

/// Persisted game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Eight column piles, bottom card first
    pub columns: Vec<Vec<Card>>,
    /// Undealt cards, dealt from the end
    pub stock: Vec<Card>,
    /// One King per completed set
    pub foundation: Vec<Card>,
    pub score: u32,
    pub completed_sets: u32,
    pub move_count: u32,
    pub level: Level,
    /// Seconds of play reported by the caller
    pub elapsed_time: u64,
    pub remaining_special_actions: u32,
    pub initial_deal: InitialDeal,
    /// RFC3339 timestamp of when the record was produced
    #[serde(default)]
    pub saved_at: Option<String>,
}

impl SavedGame {
    /// Parses a JSON record. Structural problems surface as
    /// [`EngineError::InvalidRecord`]; invariants are checked on load.
    pub fn from_json(s: &str) -> Result<Self, EngineError> {
        serde_json::from_str(s).map_err(|e| EngineError::InvalidRecord(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A record that passed validation, ready to become live state.
#[derive(Debug, Clone)]
pub(crate) struct Decoded {
    pub board: Board,
    pub initial: Board,
    pub tracker: Tracker,
}

/// Validates `record` and rebuilds the boards it describes.
pub(crate) fn decode(record: &SavedGame) -> Result<Decoded, EngineError> {
    let columns = to_columns(&record.columns, "columns")?;
    let sets = record.foundation.len();
    if record.completed_sets as usize != sets {
        return Err(invalid(format!(
            "completed_sets is {} but foundation holds {}",
            record.completed_sets, sets
        )));
    }
    if sets > SETS_TO_WIN {
        return Err(invalid(format!("{} completed sets exceeds {}", sets, SETS_TO_WIN)));
    }
    if let Some(c) = record.foundation.iter().find(|c| c.rank != Rank::King) {
        return Err(invalid(format!("foundation card {} is not a King", c)));
    }
    if record.stock.iter().any(|c| c.face_up) {
        return Err(invalid("stock contains a face-up card".into()));
    }
    let board = Board::from_parts(columns, record.stock.clone(), record.foundation.clone());
    check_composition(&board, record.level, "game")?;

    let initial_columns = to_columns(&record.initial_deal.columns, "initial_deal.columns")?;
    let initial = Board::from_parts(initial_columns, record.initial_deal.stock.clone(), Vec::new());
    check_composition(&initial, record.level, "initial deal")?;

    Ok(Decoded {
        board,
        initial,
        tracker: Tracker::with_values(record.score, record.move_count),
    })
}

fn invalid(msg: String) -> EngineError {
    EngineError::InvalidRecord(msg)
}

fn to_columns(piles: &[Vec<Card>], field: &str) -> Result<[Vec<Card>; COLUMN_COUNT], EngineError> {
    if piles.len() != COLUMN_COUNT {
        return Err(invalid(format!(
            "{} has {} piles, expected {}",
            field,
            piles.len(),
            COLUMN_COUNT
        )));
    }
    Ok(std::array::from_fn(|i| piles[i].clone()))
}

/// Card conservation plus exact per-(suit, rank) multiplicity for `level`.
/// Each foundation entry stands for one full set of its suit.
fn check_composition(board: &Board, level: Level, what: &str) -> Result<(), EngineError> {
    let total = board.card_count();
    if total != DECK_SIZE {
        return Err(invalid(format!("{} holds {} cards, expected {}", what, total, DECK_SIZE)));
    }

    let mut counts: HashMap<(Suit, Rank), usize> = HashMap::new();
    for card in board.columns().iter().flatten().chain(board.stock().iter()) {
        *counts.entry((card.suit, card.rank)).or_default() += 1;
    }
    for king in board.foundation() {
        for rank in all_ranks() {
            *counts.entry((king.suit, rank)).or_default() += 1;
        }
    }

    let expected = level.repetitions();
    for &suit in level.suits() {
        for rank in all_ranks() {
            let got = counts.remove(&(suit, rank)).unwrap_or(0);
            if got != expected {
                return Err(invalid(format!(
                    "{} has {} of {:?} {:?}, expected {}",
                    what, got, rank, suit, expected
                )));
            }
        }
    }
    if let Some(((suit, _), _)) = counts.into_iter().next() {
        return Err(invalid(format!("{} contains {:?}, not used at level {}", what, suit, level)));
    }
    Ok(())
}

/// Single-slot key-value storage for saved games. The engine never touches
/// storage itself; front ends inject an implementation.
pub trait GameStore {
    /// Returns the saved record, or `None` when the slot is empty.
    fn load(&self) -> Result<Option<SavedGame>, StoreError>;
    fn save(&mut self, record: &SavedGame) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store keyed by [`SAVE_KEY`]. Keeps the JSON text, not the struct,
/// so round-trips go through the same encoding as a real backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access for tests that plant corrupt data.
    pub fn put_raw(&mut self, json: impl Into<String>) {
        self.slots.insert(SAVE_KEY.to_string(), json.into());
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> Result<Option<SavedGame>, StoreError> {
        match self.slots.get(SAVE_KEY) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, record: &SavedGame) -> Result<(), StoreError> {
        self.slots.insert(SAVE_KEY.to_string(), record.to_json()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slots.remove(SAVE_KEY);
        Ok(())
    }
}
