//! Move validation and run scanning.
//!
//! Everything here is a pure function over card slices so the engine, the
//! hint engine and the auto-solver share one definition of what a run is.

use std::ops::Range;

use crate::cards::Card;
use crate::errors::IllegalMove;

/// Length of a completed King-to-Ace set.
pub const SET_LEN: usize = 13;

/// Returns the index range of the movable run at the top of `pile`.
///
/// The scan starts at the top card and walks down while cards are face up and
/// each card continues the run of the one beneath it. A face-up top card is
/// always a run of at least one; an empty pile or a face-down top card yields
/// an empty range.
///
/// # Examples
///
/// ```
/// use spider_engine::cards::{Card, Rank, Suit};
/// use spider_engine::rules::draggable_run;
///
/// let pile = vec![
///     Card::new(Suit::Spades, Rank::Two),
///     Card::face_up(Suit::Hearts, Rank::Eight),
///     Card::face_up(Suit::Spades, Rank::Seven),
///     Card::face_up(Suit::Spades, Rank::Six),
/// ];
/// assert_eq!(draggable_run(&pile), 2..4);
/// ```
pub fn draggable_run(pile: &[Card]) -> Range<usize> {
    let len = pile.len();
    match pile.last() {
        Some(top) if top.face_up => {}
        _ => return len..len,
    }
    let mut start = len - 1;
    while start > 0 {
        let below = &pile[start - 1];
        if !below.face_up || !pile[start].continues_run_on(below) {
            break;
        }
        start -= 1;
    }
    start..len
}

/// True when `cards` is non-empty, fully face up, single-suit and descends by
/// exactly one rank from first to last.
pub fn is_run(cards: &[Card]) -> bool {
    !cards.is_empty()
        && cards.iter().all(|c| c.face_up)
        && cards.windows(2).all(|pair| pair[1].continues_run_on(&pair[0]))
}

/// True iff `cards` is exactly thirteen face-up cards of one suit ordered
/// King (bottom) down to Ace (top).
pub fn is_completed_set(cards: &[Card]) -> bool {
    if cards.len() != SET_LEN {
        return false;
    }
    let suit = cards[0].suit;
    cards
        .iter()
        .enumerate()
        .all(|(i, c)| c.face_up && c.suit == suit && c.rank.value() as usize == SET_LEN - i)
}

/// True when the top thirteen cards of `pile` form a completed set.
pub fn has_completed_set_on_top(pile: &[Card]) -> bool {
    pile.len() >= SET_LEN && is_completed_set(&pile[pile.len() - SET_LEN..])
}

/// Indices of every column whose top thirteen cards form a completed set,
/// ascending.
pub fn find_completed_sets(columns: &[Vec<Card>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, pile)| has_completed_set_on_top(pile))
        .map(|(i, _)| i)
        .collect()
}

/// True when `target` accepts a run whose bottom card is `bottom`: the target
/// is empty or its face-up top card is exactly one rank higher. Suit is
/// irrelevant to legality.
pub fn accepts(target: &[Card], bottom: &Card) -> bool {
    match target.last() {
        None => true,
        Some(top) => top.face_up && top.rank.value() == bottom.rank.value() + 1,
    }
}

/// Whether `run` is a valid run that may be placed on `target`.
pub fn can_move(run: &[Card], target: &[Card]) -> bool {
    is_run(run) && accepts(target, &run[0])
}

/// Full legality check for moving `columns[source][card_index..]` onto
/// `columns[target]`.
///
/// # Errors
///
/// Returns the first [`IllegalMove`] reason found, checked in this order:
/// pile range, same pile, card range, face-down card, not a run, rank mismatch.
pub fn validate_move(
    columns: &[Vec<Card>],
    source: usize,
    card_index: usize,
    target: usize,
) -> Result<(), IllegalMove> {
    let src = columns
        .get(source)
        .ok_or(IllegalMove::PileOutOfRange { pile: source })?;
    let dst = columns
        .get(target)
        .ok_or(IllegalMove::PileOutOfRange { pile: target })?;
    if source == target {
        return Err(IllegalMove::SamePile);
    }
    let card = src.get(card_index).ok_or(IllegalMove::CardOutOfRange {
        pile: source,
        index: card_index,
    })?;
    if !card.face_up {
        return Err(IllegalMove::FaceDownCard {
            pile: source,
            index: card_index,
        });
    }
    if card_index < draggable_run(src).start {
        return Err(IllegalMove::NotARun {
            pile: source,
            index: card_index,
        });
    }
    if !can_move(&src[card_index..], dst) {
        return Err(IllegalMove::RankMismatch { target });
    }
    Ok(())
}
