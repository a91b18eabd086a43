#![allow(dead_code)]

use spider_engine::board::COLUMN_COUNT;
use spider_engine::cards::{all_ranks, Card, Rank, Suit};
use spider_engine::deck::{build_deck, Level};
use spider_engine::engine::Engine;
use spider_engine::persist::SavedGame;

pub fn up(suit: Suit, v: u8) -> Card {
    Card::face_up(suit, Rank::from_u8(v).unwrap())
}

pub fn down(suit: Suit, v: u8) -> Card {
    Card::new(suit, Rank::from_u8(v).unwrap())
}

/// King at index 0 down to Ace on top.
pub fn king_to_ace(suit: Suit) -> Vec<Card> {
    all_ranks()
        .iter()
        .rev()
        .map(|&r| Card::face_up(suit, r))
        .collect()
}

pub fn king(suit: Suit) -> Card {
    Card::face_up(suit, Rank::King)
}

/// A loadable record with the given columns and foundation. Cards of the
/// level's deck that are not placed end up in the stock, face down.
pub fn record_with(level: Level, columns: Vec<Vec<Card>>, foundation: Vec<Card>) -> SavedGame {
    let mut pool = build_deck(level);
    let mut take = |suit: Suit, rank: Rank| {
        let pos = pool
            .iter()
            .position(|c| c.suit == suit && c.rank == rank)
            .unwrap_or_else(|| panic!("no {:?} {:?} left in the deck", rank, suit));
        pool.remove(pos);
    };
    for card in columns.iter().flatten() {
        take(card.suit, card.rank);
    }
    for k in &foundation {
        for rank in all_ranks() {
            take(k.suit, rank);
        }
    }
    let stock: Vec<Card> = pool.into_iter().map(|c| Card::new(c.suit, c.rank)).collect();

    let mut piles = columns;
    piles.resize(COLUMN_COUNT, Vec::new());

    let mut record = Engine::new(level, Some(1)).serialize();
    record.columns = piles;
    record.stock = stock;
    record.completed_sets = foundation.len() as u32;
    record.foundation = foundation;
    record.saved_at = None;
    record
}

pub fn engine_with(level: Level, columns: Vec<Vec<Card>>, foundation: Vec<Card>) -> Engine {
    Engine::from_record(&record_with(level, columns, foundation)).expect("test record is valid")
}
