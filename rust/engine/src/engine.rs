use chrono::{SecondsFormat, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::board::{Board, COLUMN_COUNT};
use crate::cards::Card;
use crate::deck::{Deck, Level};
use crate::errors::{EngineError, IllegalMove};
use crate::hint::{best_hint, Hint};
use crate::history::{History, Snapshot, DEFAULT_CAPACITY};
use crate::persist::{decode, InitialDeal, SavedGame};
use crate::rules::validate_move;
use crate::scoring::{ScoreEvent, Tracker};
use crate::solver::{is_terminal_phase, plan_step, SolverAction, SolverState, StepOutcome};

/// Special actions granted at the start of every deal.
pub const SPECIAL_ACTIONS: u32 = 4;

/// Read-only view of the game returned by every command. Front ends render
/// from this and never touch the engine's piles directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardState {
    pub level: Level,
    pub columns: [Vec<Card>; COLUMN_COUNT],
    pub stock_len: usize,
    pub deals_remaining: usize,
    pub foundation: Vec<Card>,
    pub score: u32,
    pub move_count: u32,
    pub completed_sets: usize,
    pub won: bool,
    pub can_undo: bool,
    pub can_auto_complete: bool,
    pub elapsed_secs: u64,
    pub special_actions: u32,
}

/// Spider-Solitaire rule and state engine.
///
/// Owns the board and everything derived from it. Each command either commits
/// fully or returns an error with the state untouched.
///
/// # Examples
///
/// ```
/// use spider_engine::deck::Level;
/// use spider_engine::engine::Engine;
/// use spider_engine::errors::EngineError;
///
/// let mut engine = Engine::new(Level::Beginner, Some(42));
/// assert_eq!(engine.state().stock_len, 60);
///
/// let state = engine.deal().expect("fresh deal has a full stock");
/// assert_eq!(state.stock_len, 52);
/// assert_eq!(state.score, 495);
///
/// engine.undo().expect("deal is undoable");
/// assert_eq!(engine.undo(), Err(EngineError::HistoryEmpty));
/// ```
#[derive(Debug)]
pub struct Engine {
    level: Level,
    /// Live board
    board: Board,
    /// Board as first dealt, for restarts
    initial: Board,
    tracker: Tracker,
    history: History,
    elapsed_secs: u64,
    special_actions: u32,
    /// Hint currently on display, if any
    active_hint: Option<Hint>,
    solver_state: SolverState,
    rng: ChaCha20Rng,
}

impl Engine {
    /// Starts a new game. Without a seed the deal is random.
    pub fn new(level: Level, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut deck = Deck::new_with_seed(level, seed);
        deck.shuffle();
        let board = Board::deal_new(&mut deck);
        tracing::info!(level = %level, seed, "new game dealt");
        Self {
            level,
            initial: board.clone(),
            board,
            tracker: Tracker::new(),
            history: History::new(DEFAULT_CAPACITY),
            elapsed_secs: 0,
            special_actions: SPECIAL_ACTIONS,
            active_hint: None,
            solver_state: SolverState::Idle,
            rng: deck.into_rng(),
        }
    }

    /// Builds an engine from a saved record.
    pub fn from_record(record: &SavedGame) -> Result<Self, EngineError> {
        let mut engine = Self::new(record.level, None);
        engine.load_state(record)?;
        Ok(engine)
    }

    /// Replaces the undo depth, dropping any recorded history.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = History::new(depth);
        self
    }

    /// Discards the current game and deals a fresh one.
    pub fn new_game(&mut self, level: Level, seed: Option<u64>) -> BoardState {
        let depth = self.history.capacity();
        *self = Self::new(level, seed).with_history_depth(depth);
        self.state()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    pub fn move_count(&self) -> u32 {
        self.tracker.move_count()
    }

    pub fn completed_sets(&self) -> usize {
        self.board.completed_sets()
    }

    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn solver_state(&self) -> SolverState {
        self.solver_state
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn special_actions(&self) -> u32 {
        self.special_actions
    }

    pub fn active_hint(&self) -> Option<Hint> {
        self.active_hint
    }

    /// Whether the auto-solver may run right now.
    pub fn can_auto_complete(&self) -> bool {
        !self.is_won() && is_terminal_phase(&self.board)
    }

    pub fn state(&self) -> BoardState {
        BoardState {
            level: self.level,
            columns: self.board.columns().clone(),
            stock_len: self.board.stock().len(),
            deals_remaining: self.board.deals_remaining(),
            foundation: self.board.foundation().to_vec(),
            score: self.tracker.score(),
            move_count: self.tracker.move_count(),
            completed_sets: self.board.completed_sets(),
            won: self.is_won(),
            can_undo: !self.history.is_empty(),
            can_auto_complete: self.can_auto_complete(),
            elapsed_secs: self.elapsed_secs,
            special_actions: self.special_actions,
        }
    }

    /// Moves the run starting at `card_index` in `source` onto `target`.
    ///
    /// # Errors
    ///
    /// [`EngineError::AlreadyWon`] after a win, otherwise
    /// [`EngineError::IllegalMove`] with the reason the move was refused.
    pub fn move_run(
        &mut self,
        source: usize,
        card_index: usize,
        target: usize,
    ) -> Result<BoardState, EngineError> {
        self.ensure_playable()?;
        if let Err(reason) = validate_move(self.board.columns(), source, card_index, target) {
            tracing::debug!(source, card_index, target, %reason, "move rejected");
            return Err(reason.into());
        }
        let snapshot = self.checkpoint();
        let len = self.board.transfer_run(source, card_index, target);
        self.tracker.record(ScoreEvent::Move);
        tracing::debug!(from = source, to = target, len, "run moved");
        self.commit(snapshot);
        Ok(self.state())
    }

    /// Turns the face-down top card of `pile` face up.
    pub fn flip(&mut self, pile: usize) -> Result<BoardState, EngineError> {
        self.ensure_playable()?;
        let top = self
            .board
            .column(pile)
            .ok_or(IllegalMove::PileOutOfRange { pile })?
            .last();
        if !top.is_some_and(|c| !c.face_up) {
            return Err(IllegalMove::NotFlippable { pile }.into());
        }
        let snapshot = self.checkpoint();
        self.board.flip_top(pile);
        tracing::debug!(pile, "card flipped");
        self.commit(snapshot);
        Ok(self.state())
    }

    /// Deals one card from the stock onto each column.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyStock`] when the stock is exhausted or any column
    /// is empty.
    pub fn deal(&mut self) -> Result<BoardState, EngineError> {
        self.ensure_playable()?;
        if self.board.stock().is_empty() || self.board.has_empty_column() {
            tracing::debug!(
                stock = self.board.stock().len(),
                empty_column = self.board.has_empty_column(),
                "deal rejected"
            );
            return Err(EngineError::EmptyStock);
        }
        let snapshot = self.checkpoint();
        let dealt = self.board.deal_row();
        self.tracker.record(ScoreEvent::Deal);
        tracing::debug!(dealt, stock = self.board.stock().len(), "row dealt");
        self.commit(snapshot);
        Ok(self.state())
    }

    /// Restores the state from before the last committed command.
    pub fn undo(&mut self) -> Result<BoardState, EngineError> {
        self.ensure_playable()?;
        let snapshot = self.history.pop().ok_or(EngineError::HistoryEmpty)?;
        self.board = snapshot.board;
        self.tracker = snapshot.tracker;
        self.special_actions = snapshot.special_actions;
        self.active_hint = None;
        self.solver_state = SolverState::Idle;
        tracing::debug!(remaining = self.history.len(), "undo");
        Ok(self.state())
    }

    /// Suggests a move. While a hint is on display the same suggestion is
    /// returned without recomputing.
    pub fn request_hint(&mut self) -> Hint {
        if let Some(hint) = self.active_hint {
            return hint;
        }
        let hint = best_hint(&self.board);
        tracing::debug!(?hint, "hint computed");
        self.active_hint = Some(hint);
        hint
    }

    /// Drops the hint on display, typically once its display time is over.
    pub fn clear_hint(&mut self) {
        self.active_hint = None;
    }

    /// Runs one auto-solver step.
    ///
    /// # Errors
    ///
    /// [`EngineError::SolverUnavailable`] unless the stock is empty and every
    /// card is face up.
    pub fn step(&mut self) -> Result<StepOutcome, EngineError> {
        if self.is_won() {
            self.solver_state = SolverState::Done;
            return Ok(StepOutcome::Won);
        }
        if !is_terminal_phase(&self.board) {
            return Err(EngineError::SolverUnavailable);
        }
        let Some(action) = plan_step(&self.board) else {
            self.solver_state = SolverState::Stalled;
            tracing::debug!("auto-complete stalled");
            return Ok(StepOutcome::Stalled);
        };

        let snapshot = self.checkpoint();
        let outcome = match action {
            SolverAction::RemoveSet { column } => match self.board.remove_set_at(column) {
                Some(removal) => {
                    self.tracker.record(ScoreEvent::SetsCompleted(1));
                    tracing::debug!(column, "auto-complete removed set");
                    StepOutcome::Completed {
                        column,
                        card: removal.card,
                    }
                }
                None => {
                    self.solver_state = SolverState::Stalled;
                    return Ok(StepOutcome::Stalled);
                }
            },
            SolverAction::Relocate { from, start, to } => {
                let len = self.board.transfer_run(from, start, to);
                self.tracker.record(ScoreEvent::Move);
                tracing::debug!(from, to, len, "auto-complete moved run");
                StepOutcome::Moved { from, to, len }
            }
        };
        self.history.push(snapshot);
        self.active_hint = None;

        if self.is_won() {
            self.solver_state = SolverState::Done;
            tracing::info!(score = self.tracker.score(), "game won");
            return Ok(StepOutcome::Won);
        }
        self.solver_state = SolverState::Running;
        Ok(outcome)
    }

    /// Spends one special action to reshuffle the tableau in place.
    pub fn use_special_action(&mut self) -> Result<BoardState, EngineError> {
        self.ensure_playable()?;
        if self.special_actions == 0 {
            return Err(EngineError::NoSpecialActions);
        }
        let snapshot = self.checkpoint();
        if !self.board.reshuffle_tableau(&mut self.rng) {
            tracing::debug!("reshuffle produced no change");
            return Ok(self.state());
        }
        self.special_actions -= 1;
        tracing::debug!(remaining = self.special_actions, "tableau reshuffled");
        self.commit(snapshot);
        Ok(self.state())
    }

    /// Replays the current deal from its initial layout.
    pub fn restart(&mut self) -> BoardState {
        self.board = self.initial.clone();
        self.tracker = Tracker::new();
        self.history.clear();
        self.elapsed_secs = 0;
        self.special_actions = SPECIAL_ACTIONS;
        self.active_hint = None;
        self.solver_state = SolverState::Idle;
        tracing::info!(level = %self.level, "deal restarted");
        self.state()
    }

    /// Adds caller-measured play time. Ignored once the game is won.
    pub fn add_elapsed(&mut self, secs: u64) {
        if !self.is_won() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
        }
    }

    /// Captures the full resumable state.
    pub fn serialize(&self) -> SavedGame {
        SavedGame {
            columns: self.board.columns().to_vec(),
            stock: self.board.stock().to_vec(),
            foundation: self.board.foundation().to_vec(),
            score: self.tracker.score(),
            completed_sets: self.board.completed_sets() as u32,
            move_count: self.tracker.move_count(),
            level: self.level,
            elapsed_time: self.elapsed_secs,
            remaining_special_actions: self.special_actions,
            initial_deal: InitialDeal {
                columns: self.initial.columns().to_vec(),
                stock: self.initial.stock().to_vec(),
            },
            saved_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }

    /// Replaces the whole game with `record` after validating it. History is
    /// not persisted, so undo starts empty.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidRecord`] if the record breaks any card-count or
    /// composition invariant; the current game is kept.
    pub fn load_state(&mut self, record: &SavedGame) -> Result<BoardState, EngineError> {
        let decoded = decode(record).inspect_err(|e| {
            tracing::debug!(error = %e, "saved game rejected");
        })?;
        self.level = record.level;
        self.board = decoded.board;
        self.initial = decoded.initial;
        self.tracker = decoded.tracker;
        self.history.clear();
        self.elapsed_secs = record.elapsed_time;
        self.special_actions = record.remaining_special_actions;
        self.active_hint = None;
        self.solver_state = SolverState::Idle;
        self.rng = ChaCha20Rng::seed_from_u64(rand::random());
        tracing::info!(
            level = %self.level,
            sets = self.board.completed_sets(),
            moves = self.tracker.move_count(),
            "saved game loaded"
        );
        Ok(self.state())
    }

    fn ensure_playable(&self) -> Result<(), EngineError> {
        if self.is_won() {
            return Err(EngineError::AlreadyWon);
        }
        Ok(())
    }

    fn checkpoint(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            tracker: self.tracker,
            special_actions: self.special_actions,
        }
    }

    /// Finishes a manual command: records the pre-command snapshot, sweeps
    /// completed sets and resets transient view state.
    fn commit(&mut self, snapshot: Snapshot) {
        self.history.push(snapshot);
        let removed = self.board.sweep_completed_sets();
        if !removed.is_empty() {
            self.tracker
                .record(ScoreEvent::SetsCompleted(removed.len() as u32));
            for r in &removed {
                tracing::debug!(column = r.column, suit = ?r.card.suit, "set completed");
            }
        }
        self.active_hint = None;
        self.solver_state = SolverState::Idle;
        if self.is_won() {
            tracing::info!(
                score = self.tracker.score(),
                moves = self.tracker.move_count(),
                "game won"
            );
        }
    }
}

#[cfg(test)]
impl Engine {
    /// Test-only: installs an arbitrary board as both the live and initial
    /// layout.
    pub(crate) fn with_board(level: Level, board: Board) -> Self {
        let mut engine = Self::new(level, Some(0));
        engine.initial = board.clone();
        engine.board = board;
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{all_ranks, Rank, Suit};
    use crate::deck::DECK_SIZE;

    fn up(suit: Suit, v: u8) -> Card {
        Card::face_up(suit, Rank::from_u8(v).unwrap())
    }

    fn king_to_ace(suit: Suit) -> Vec<Card> {
        all_ranks()
            .iter()
            .rev()
            .map(|&r| Card::face_up(suit, r))
            .collect()
    }

    #[test]
    fn flip_only_turns_face_down_tops() {
        let mut cols: [Vec<Card>; COLUMN_COUNT] = std::array::from_fn(|_| vec![up(Suit::Spades, 1)]);
        cols[3] = vec![Card::new(Suit::Spades, Rank::Nine)];
        let mut engine = Engine::with_board(Level::Beginner, Board::from_parts(cols, vec![], vec![]));

        assert_eq!(
            engine.flip(0),
            Err(EngineError::IllegalMove(IllegalMove::NotFlippable { pile: 0 }))
        );
        assert_eq!(
            engine.flip(8),
            Err(EngineError::IllegalMove(IllegalMove::PileOutOfRange { pile: 8 }))
        );
        let state = engine.flip(3).unwrap();
        assert!(state.columns[3][0].face_up);
        assert_eq!(state.move_count, 0);
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn completing_a_set_by_move_scores_and_sweeps() {
        let mut set = king_to_ace(Suit::Hearts);
        let ace = set.pop().unwrap();
        let mut cols: [Vec<Card>; COLUMN_COUNT] = std::array::from_fn(|_| Vec::new());
        cols[0] = set;
        cols[1] = vec![ace];
        let mut engine = Engine::with_board(Level::Beginner, Board::from_parts(cols, vec![], vec![]));

        let state = engine.move_run(1, 0, 0).unwrap();
        assert!(state.columns[0].is_empty());
        assert_eq!(state.completed_sets, 1);
        assert_eq!(state.score, 500 - 1 + 100);
        assert_eq!(state.move_count, 1);
    }

    #[test]
    fn active_hint_is_reused_until_cleared_or_state_changes() {
        let mut engine = Engine::new(Level::Advanced, Some(8));
        let first = engine.request_hint();
        assert_eq!(engine.active_hint(), Some(first));
        assert_eq!(engine.request_hint(), first);
        engine.clear_hint();
        assert_eq!(engine.active_hint(), None);
        engine.request_hint();
        engine.deal().unwrap();
        assert_eq!(engine.active_hint(), None);
    }

    #[test]
    fn special_action_consumes_a_charge_and_keeps_cards() {
        let mut engine = Engine::new(Level::Advanced, Some(17));
        let state = engine.use_special_action().unwrap();
        assert_eq!(state.special_actions, SPECIAL_ACTIONS - 1);
        assert_eq!(engine.board().card_count(), DECK_SIZE);
        for _ in 1..SPECIAL_ACTIONS {
            engine.use_special_action().unwrap();
        }
        assert_eq!(engine.use_special_action(), Err(EngineError::NoSpecialActions));
    }

    #[test]
    fn elapsed_time_accumulates() {
        let mut engine = Engine::new(Level::Beginner, Some(1));
        engine.add_elapsed(30);
        engine.add_elapsed(12);
        assert_eq!(engine.elapsed_secs(), 42);
        assert_eq!(engine.restart().elapsed_secs, 0);
    }
}
