use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::{Deck, DECK_SIZE};
use crate::rules::{has_completed_set_on_top, SET_LEN};

/// Number of tableau columns.
pub const COLUMN_COUNT: usize = 8;

/// Cards released by one full deal: one per column.
pub const DEAL_WIDTH: usize = COLUMN_COUNT;

/// Completed sets needed to win.
pub const SETS_TO_WIN: usize = DECK_SIZE / SET_LEN;

/// Starting column sizes: the first four columns get one extra card.
const INITIAL_SIZES: [usize; COLUMN_COUNT] = [6, 6, 6, 6, 5, 5, 5, 5];

/// A set removed from a column during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetRemoval {
    /// Column the set was lifted from
    pub column: usize,
    /// Representative card pushed to the foundation (the set's King)
    pub card: Card,
}

/// The tableau, the stock and the foundation. This is the only mutable card
/// container in the engine; every command ends up as one of the mutators
/// below, each of which leaves the board in a consistent state on return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Eight column piles, index 0 is the bottom card
    columns: [Vec<Card>; COLUMN_COUNT],
    /// Face-down cards awaiting a deal, consumed from the end
    stock: Vec<Card>,
    /// One representative card per completed set, in completion order
    foundation: Vec<Card>,
}

impl Board {
    /// Lays out a fresh game from a shuffled deck: 44 cards across the columns
    /// with only each top card face up, the other 60 left in the stock.
    pub fn deal_new(deck: &mut Deck) -> Self {
        let mut columns: [Vec<Card>; COLUMN_COUNT] = std::array::from_fn(|_| Vec::new());
        for (pile, &size) in columns.iter_mut().zip(INITIAL_SIZES.iter()) {
            for row in 0..size {
                if let Some(mut card) = deck.deal_card() {
                    card.face_up = row == size - 1;
                    pile.push(card);
                }
            }
        }
        let stock = deck
            .drain_remaining()
            .into_iter()
            .map(|mut c| {
                c.face_up = false;
                c
            })
            .collect();
        Self {
            columns,
            stock,
            foundation: Vec::new(),
        }
    }

    pub fn from_parts(
        columns: [Vec<Card>; COLUMN_COUNT],
        stock: Vec<Card>,
        foundation: Vec<Card>,
    ) -> Self {
        Self {
            columns,
            stock,
            foundation,
        }
    }

    pub fn columns(&self) -> &[Vec<Card>; COLUMN_COUNT] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&[Card]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn foundation(&self) -> &[Card] {
        &self.foundation
    }

    pub fn completed_sets(&self) -> usize {
        self.foundation.len()
    }

    pub fn is_won(&self) -> bool {
        self.completed_sets() >= SETS_TO_WIN
    }

    /// `Σ|columns| + |stock| + 13×|foundation|`; always 104 on a valid board.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum::<usize>()
            + self.stock.len()
            + SET_LEN * self.foundation.len()
    }

    pub fn has_empty_column(&self) -> bool {
        self.columns.iter().any(Vec::is_empty)
    }

    pub fn all_face_up(&self) -> bool {
        self.columns.iter().flatten().all(|c| c.face_up)
    }

    /// Deal actions left, counting a short final deal as one.
    pub fn deals_remaining(&self) -> usize {
        self.stock.len().div_ceil(DEAL_WIDTH)
    }

    /// Moves `columns[source][start..]` onto `columns[target]` and turns the
    /// newly exposed source card face up. Callers validate first.
    pub(crate) fn transfer_run(&mut self, source: usize, start: usize, target: usize) -> usize {
        let moved = self.columns[source].split_off(start);
        let len = moved.len();
        self.columns[target].extend(moved);
        self.expose_top(source);
        len
    }

    /// Turns the top card of `pile` face up if it is face down. Returns
    /// whether anything changed.
    pub(crate) fn flip_top(&mut self, pile: usize) -> bool {
        match self.columns.get_mut(pile).and_then(|p| p.last_mut()) {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }

    fn expose_top(&mut self, pile: usize) {
        if let Some(card) = self.columns[pile].last_mut() {
            card.face_up = true;
        }
    }

    /// Pops up to one card per column from the stock, face up, starting at
    /// column 0. Returns the number of cards dealt.
    pub(crate) fn deal_row(&mut self) -> usize {
        let mut dealt = 0;
        for pile in self.columns.iter_mut() {
            let Some(mut card) = self.stock.pop() else {
                break;
            };
            card.face_up = true;
            pile.push(card);
            dealt += 1;
        }
        dealt
    }

    /// Lifts the completed set off the top of `column`, if there is one.
    pub(crate) fn remove_set_at(&mut self, column: usize) -> Option<SetRemoval> {
        let pile = self.columns.get_mut(column)?;
        if !has_completed_set_on_top(pile) {
            return None;
        }
        let set = pile.split_off(pile.len() - SET_LEN);
        let card = set[0];
        self.foundation.push(card);
        self.expose_top(column);
        Some(SetRemoval { column, card })
    }

    /// Removes every completed set on every column, repeating per column until
    /// none remains on top.
    pub(crate) fn sweep_completed_sets(&mut self) -> Vec<SetRemoval> {
        let mut removed = Vec::new();
        for column in 0..COLUMN_COUNT {
            while let Some(r) = self.remove_set_at(column) {
                removed.push(r);
            }
        }
        removed
    }

    /// Redistributes every tableau card over the existing column shapes: each
    /// column keeps its count of face-down cards followed by face-up cards.
    /// Retries a few times until the layout actually changes.
    pub(crate) fn reshuffle_tableau<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let original = self.columns.clone();
        let geometry: Vec<(usize, usize)> = self
            .columns
            .iter()
            .map(|pile| {
                let face_down = pile.iter().filter(|c| !c.face_up).count();
                (face_down, pile.len())
            })
            .collect();
        let mut cards: Vec<Card> = self.columns.iter().flatten().copied().collect();
        if cards.len() < 2 {
            return false;
        }

        for _ in 0..8 {
            cards.shuffle(rng);
            let mut drawn = cards.iter().copied();
            for (pile, &(face_down, len)) in self.columns.iter_mut().zip(geometry.iter()) {
                pile.clear();
                for idx in 0..len {
                    if let Some(mut card) = drawn.next() {
                        card.face_up = idx >= face_down;
                        pile.push(card);
                    }
                }
            }
            if self.columns != original {
                return true;
            }
        }
        false
    }
}
