use std::collections::HashMap;

use spider_engine::cards::{Rank, Suit};
use spider_engine::deck::{build_deck, Deck, Level, DECK_SIZE};
use spider_engine::engine::Engine;

#[test]
fn beginner_deck_is_104_spades() {
    let deck = build_deck(Level::Beginner);
    assert_eq!(deck.len(), DECK_SIZE);
    assert!(deck.iter().all(|c| c.suit == Suit::Spades));
    assert!(deck.iter().all(|c| !c.face_up));
}

#[test]
fn every_level_has_equal_copies_of_each_card() {
    for (level, copies) in [
        (Level::Beginner, 8),
        (Level::Intermediate, 4),
        (Level::Advanced, 2),
    ] {
        let mut counts: HashMap<(Suit, Rank), usize> = HashMap::new();
        for c in build_deck(level) {
            *counts.entry((c.suit, c.rank)).or_default() += 1;
        }
        assert_eq!(counts.len(), 13 * level.suits().len(), "{}", level);
        assert!(counts.values().all(|&n| n == copies), "{}", level);
    }
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let mut a = Deck::new_with_seed(Level::Advanced, 99);
    let mut b = Deck::new_with_seed(Level::Advanced, 99);
    a.shuffle();
    b.shuffle();
    assert_eq!(a.drain_remaining(), b.drain_remaining());

    let mut c = Deck::new_with_seed(Level::Advanced, 100);
    c.shuffle();
    let mut a = Deck::new_with_seed(Level::Advanced, 99);
    a.shuffle();
    assert_ne!(a.drain_remaining(), c.drain_remaining());
}

#[test]
fn new_game_layout_and_counters() {
    let engine = Engine::new(Level::Intermediate, Some(5));
    let state = engine.state();
    let sizes: Vec<usize> = state.columns.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![6, 6, 6, 6, 5, 5, 5, 5]);
    assert_eq!(state.stock_len, 60);
    assert_eq!(state.score, 500);
    assert_eq!(state.move_count, 0);
    assert_eq!(state.completed_sets, 0);
    assert_eq!(state.special_actions, 4);
    assert!(!state.can_undo);
    assert!(!state.won);
    for pile in &state.columns {
        let (top, rest) = pile.split_last().unwrap();
        assert!(top.face_up);
        assert!(rest.iter().all(|c| !c.face_up));
    }
}

#[test]
fn new_game_replaces_everything() {
    let mut engine = Engine::new(Level::Beginner, Some(5));
    engine.deal().unwrap();
    let state = engine.new_game(Level::Advanced, Some(6));
    assert_eq!(state.level, Level::Advanced);
    assert_eq!(state.stock_len, 60);
    assert_eq!(state.score, 500);
    assert!(!state.can_undo);
    assert_eq!(engine.board(), Engine::new(Level::Advanced, Some(6)).board());
}
