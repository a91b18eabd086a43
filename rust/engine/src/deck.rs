use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cards::{suit_set, Card, Suit};

/// Total cards in play for every difficulty.
pub const DECK_SIZE: usize = 104;

/// Difficulty level. Each level trades suit variety for repetitions so the
/// deck always holds eight full King-to-Ace sets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// One suit (spades), eight copies
    Beginner,
    /// Two suits (spades, hearts), four copies each
    Intermediate,
    /// All four suits, two copies each
    Advanced,
}

impl Level {
    pub fn suits(self) -> &'static [Suit] {
        match self {
            Level::Beginner => &[Suit::Spades],
            Level::Intermediate => &[Suit::Spades, Suit::Hearts],
            Level::Advanced => &[Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs],
        }
    }

    pub fn repetitions(self) -> usize {
        match self {
            Level::Beginner => 8,
            Level::Intermediate => 4,
            Level::Advanced => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "1" => Ok(Level::Beginner),
            "intermediate" | "2" => Ok(Level::Intermediate),
            "advanced" | "4" => Ok(Level::Advanced),
            other => Err(format!(
                "unknown level '{}' (expected beginner, intermediate or advanced)",
                other
            )),
        }
    }
}

/// Builds the unshuffled 104-card deck for `level`, every card face down.
pub fn build_deck(level: Level) -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for _ in 0..level.repetitions() {
        for &suit in level.suits() {
            v.extend(suit_set(suit));
        }
    }
    v
}

/// Seeded, shuffleable spider deck.
///
/// # Examples
///
/// ```
/// use spider_engine::deck::{Deck, Level};
///
/// let mut a = Deck::new_with_seed(Level::Advanced, 7);
/// let mut b = Deck::new_with_seed(Level::Advanced, 7);
/// a.shuffle();
/// b.shuffle();
/// assert_eq!(a.deal_card(), b.deal_card());
/// assert_eq!(a.remaining(), 103);
/// ```
#[derive(Debug)]
pub struct Deck {
    level: Level,
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(level: Level, seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            level,
            cards: build_deck(level),
            position: 0,
            rng,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn shuffle(&mut self) {
        self.cards = build_deck(self.level);
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    /// Everything not yet dealt, in deck order.
    pub fn drain_remaining(&mut self) -> Vec<Card> {
        let rest = self.cards[self.position.min(self.cards.len())..].to_vec();
        self.position = self.cards.len();
        rest
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Hands over the RNG so later reshuffles continue the same seeded stream.
    pub fn into_rng(self) -> ChaCha20Rng {
        self.rng
    }
}
