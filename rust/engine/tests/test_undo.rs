mod support;

use spider_engine::cards::Suit;
use spider_engine::deck::Level;
use spider_engine::engine::Engine;
use spider_engine::errors::EngineError;
use spider_engine::hint::Hint;
use support::{down, engine_with, up};

#[test]
fn undo_restores_exact_prior_state_for_each_command() {
    let mut engine = engine_with(
        Level::Beginner,
        vec![
            vec![down(Suit::Spades, 1), up(Suit::Spades, 8), up(Suit::Spades, 7)],
            vec![up(Suit::Spades, 9)],
            vec![up(Suit::Spades, 2), down(Suit::Spades, 3)],
            vec![up(Suit::Spades, 4)],
            vec![up(Suit::Spades, 4)],
            vec![up(Suit::Spades, 4)],
            vec![up(Suit::Spades, 4)],
            vec![up(Suit::Spades, 4)],
        ],
        vec![],
    );

    let before = engine.state();
    engine.move_run(0, 1, 1).unwrap();
    assert_eq!(engine.undo().unwrap(), before);

    engine.flip(2).unwrap();
    assert_eq!(engine.undo().unwrap(), before);

    engine.deal().unwrap();
    assert_eq!(engine.undo().unwrap(), before);

    engine.use_special_action().unwrap();
    assert_eq!(engine.undo().unwrap(), before);
}

#[test]
fn undoing_a_special_action_gives_the_charge_back() {
    let mut engine = Engine::new(Level::Advanced, Some(17));
    let before = engine.state();
    let shuffled = engine.use_special_action().unwrap();
    assert_eq!(shuffled.special_actions, 3);

    let restored = engine.undo().unwrap();
    assert_eq!(restored.special_actions, 4);
    assert_eq!(restored, before);
}

#[test]
fn repeated_undo_empties_history() {
    let mut engine = Engine::new(Level::Advanced, Some(77));
    let start = engine.state();
    engine.deal().unwrap();
    engine.deal().unwrap();
    if let Hint::Move(mv) = engine.request_hint() {
        engine.move_run(mv.from, mv.start, mv.to).unwrap();
    }
    while engine.state().can_undo {
        engine.undo().unwrap();
    }
    assert_eq!(engine.undo(), Err(EngineError::HistoryEmpty));
    assert_eq!(engine.board(), Engine::new(Level::Advanced, Some(77)).board());
    assert_eq!(engine.state().score, start.score);
}

#[test]
fn history_keeps_only_the_most_recent_twenty() {
    let mut columns = vec![
        vec![up(Suit::Spades, 7)],
        vec![up(Suit::Spades, 7), up(Suit::Spades, 6)],
    ];
    columns.extend((0..6).map(|_| vec![up(Suit::Spades, 4)]));
    let mut engine = engine_with(Level::Beginner, columns, vec![]);

    for i in 0..25 {
        let (from, to) = if i % 2 == 0 { (1, 0) } else { (0, 1) };
        engine.move_run(from, 1, to).unwrap();
    }
    assert_eq!(engine.history_len(), 20);
    for _ in 0..20 {
        engine.undo().unwrap();
    }
    assert_eq!(engine.undo(), Err(EngineError::HistoryEmpty));
    assert_eq!(engine.move_count(), 5);
}

#[test]
fn history_depth_is_configurable() {
    let mut engine = Engine::new(Level::Advanced, Some(9)).with_history_depth(2);
    for _ in 0..3 {
        engine.deal().unwrap();
    }
    assert_eq!(engine.history_len(), 2);
    engine.undo().unwrap();
    engine.undo().unwrap();
    assert_eq!(engine.undo(), Err(EngineError::HistoryEmpty));
    assert_eq!(engine.state().stock_len, 52);
}

#[test]
fn undo_clears_hint() {
    let mut engine = Engine::new(Level::Advanced, Some(3));
    engine.deal().unwrap();
    engine.request_hint();
    engine.undo().unwrap();
    assert_eq!(engine.active_hint(), None);
}

#[test]
fn restart_replays_the_same_deal() {
    let mut engine = Engine::new(Level::Intermediate, Some(31));
    let dealt = engine.board().clone();
    engine.deal().unwrap();
    engine.use_special_action().unwrap();
    engine.add_elapsed(90);

    let state = engine.restart();
    assert_eq!(engine.board(), &dealt);
    assert_eq!(state.score, 500);
    assert_eq!(state.move_count, 0);
    assert_eq!(state.elapsed_secs, 0);
    assert_eq!(state.special_actions, 4);
    assert!(!state.can_undo);
}
