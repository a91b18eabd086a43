use serde::{Deserialize, Serialize};

/// Score at the start of every deal.
pub const STARTING_SCORE: u32 = 500;
/// Cost of a committed run move (manual or auto-relocated).
pub const MOVE_PENALTY: u32 = 1;
/// Cost of a deal from the stock.
pub const DEAL_PENALTY: u32 = 5;
/// Reward per completed set.
pub const SET_BONUS: u32 = 100;

/// A committed action that affects score or move count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// A run moved between columns
    Move,
    /// A row dealt from the stock
    Deal,
    /// One or more sets removed to the foundation
    SetsCompleted(u32),
}

/// Running score and move counter. Only ever updated from committed commands;
/// undo restores an earlier copy wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    score: u32,
    move_count: u32,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            score: STARTING_SCORE,
            move_count: 0,
        }
    }

    pub fn with_values(score: u32, move_count: u32) -> Self {
        Self { score, move_count }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Applies the delta for `event`. Score floors at zero.
    pub fn record(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::Move => {
                self.score = self.score.saturating_sub(MOVE_PENALTY);
                self.move_count = self.move_count.saturating_add(1);
            }
            ScoreEvent::Deal => {
                self.score = self.score.saturating_sub(DEAL_PENALTY);
                self.move_count = self.move_count.saturating_add(1);
            }
            ScoreEvent::SetsCompleted(n) => {
                self.score = self.score.saturating_add(SET_BONUS.saturating_mul(n));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_follow_the_rules() {
        let mut t = Tracker::new();
        t.record(ScoreEvent::Move);
        assert_eq!((t.score(), t.move_count()), (499, 1));
        t.record(ScoreEvent::Deal);
        assert_eq!((t.score(), t.move_count()), (494, 2));
        t.record(ScoreEvent::SetsCompleted(2));
        assert_eq!((t.score(), t.move_count()), (694, 2));
    }

    #[test]
    fn score_never_goes_negative() {
        let mut t = Tracker::with_values(3, 10);
        t.record(ScoreEvent::Deal);
        assert_eq!(t.score(), 0);
        t.record(ScoreEvent::Move);
        assert_eq!(t.score(), 0);
        assert_eq!(t.move_count(), 12);
    }
}
