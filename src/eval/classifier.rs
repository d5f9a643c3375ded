//! Hand classification for 5-7 card pools.
//!
//! Classification runs nine detectors, strongest category first, and returns
//! the first match. The order lives in [`CLASSIFIERS`] and must not change:
//! a lower detector may also match a pool that holds a stronger hand (every
//! full house contains a pair), so only the descending order guarantees the
//! best category wins.
//!
//! All detectors work on value and suit counts, so the result does not
//! depend on the order in which cards are supplied.

use crate::cards::{Card, Suit, VALUE_2, VALUE_5, VALUE_A};

use super::hand::{Category, Hand};

/// Minimum number of cards needed to form a hand.
pub const MIN_HAND_CARDS: usize = 5;

/// A detector reports the hand of its category, or `None` if absent.
pub type Detector = fn(&Pool) -> Option<Hand>;

/// All detectors, strongest category first.
pub const CLASSIFIERS: [(Category, Detector); 9] = [
    (Category::StraightFlush, find_straight_flush),
    (Category::FourOfAKind, find_quads),
    (Category::FullHouse, find_full_house),
    (Category::Flush, find_flush),
    (Category::Straight, find_straight),
    (Category::ThreeOfAKind, find_trips),
    (Category::TwoPair, find_two_pair),
    (Category::Pair, find_pair),
    (Category::HighCard, find_high_card),
];

/// Classify the best hand made from hole and board cards.
///
/// Returns `None` when fewer than 5 cards are supplied: there is no hand
/// yet and the caller has to keep drawing.
pub fn classify(hole: &[Card], board: &[Card]) -> Option<Hand> {
    if hole.len() + board.len() < MIN_HAND_CARDS {
        return None;
    }
    let pool = Pool::new(hole, board);
    CLASSIFIERS.iter().find_map(|(_, detect)| detect(&pool))
}

/// Card counts of a combined hole + board pool.
#[derive(Debug, Clone)]
pub struct Pool {
    /// Occurrences of each value, indexed by value (2-14).
    value_counts: [u8; 15],
    /// Bitmask of values present per suit, bit = value.
    suit_values: [u16; 4],
    /// Number of cards per suit.
    suit_counts: [u8; 4],
}

impl Pool {
    /// Build the counts for hole + board.
    pub fn new(hole: &[Card], board: &[Card]) -> Self {
        let mut pool = Self {
            value_counts: [0; 15],
            suit_values: [0; 4],
            suit_counts: [0; 4],
        };
        for card in hole.iter().chain(board) {
            let suit = card.suit().index();
            pool.value_counts[card.value() as usize] += 1;
            pool.suit_values[suit] |= 1 << card.value();
            pool.suit_counts[suit] += 1;
        }
        pool
    }

    /// How many cards of a value (2-14) are present.
    fn count(&self, value: u8) -> u8 {
        self.value_counts[value as usize]
    }

    /// Distinct values present, highest first.
    fn values_desc(&self) -> impl Iterator<Item = u8> + '_ {
        (VALUE_2..=VALUE_A).rev().filter(move |&v| self.count(v) > 0)
    }

    /// Bitmask of all values present.
    fn value_mask(&self) -> u16 {
        self.suit_values.iter().fold(0, |mask, &suit| mask | suit)
    }

    /// Highest value with exactly `n` copies.
    fn highest_with_count(&self, n: u8) -> Option<u8> {
        self.values_desc().find(|&v| self.count(v) == n)
    }

    /// Highest values not in `used`, best first.
    fn best_excluding<'a>(&'a self, used: &'a [u8]) -> impl Iterator<Item = u8> + 'a {
        self.values_desc().filter(move |v| !used.contains(v))
    }

    /// The suit holding at least five cards, if any.
    fn flush_suit(&self) -> Option<Suit> {
        Suit::ALL
            .into_iter()
            .filter(|s| self.suit_counts[s.index()] >= 5)
            .max_by_key(|s| self.suit_counts[s.index()])
    }
}

/// Find the highest five-card run in a value bitmask (bit = value).
///
/// Scans from the ace down to the deuce, then the ace again as a one, so the
/// wheel (5-4-3-2-A) is found last and reports 5 as its top card. Any missing
/// value resets the streak.
fn highest_run(mask: u16) -> Option<u8> {
    if mask.count_ones() < 5 {
        return None;
    }
    let has_ace = mask & (1 << VALUE_A) != 0;
    let mut streak = 0;
    let mut top = 0;
    for value in (1..=VALUE_A).rev() {
        let present = if value == 1 {
            has_ace
        } else {
            mask & (1 << value) != 0
        };
        if !present {
            streak = 0;
            continue;
        }
        if streak == 0 {
            top = value;
        }
        streak += 1;
        if streak == 5 {
            debug_assert!(top >= VALUE_5);
            return Some(top);
        }
    }
    None
}

/// Pair, trips or quads: the highest value with exactly `n` copies.
fn find_multiple(pool: &Pool, n: u8, category: Category) -> Option<Hand> {
    let value = pool.highest_with_count(n)?;
    let used = [value];
    let mut rest = pool.best_excluding(&used);
    let hand = match category {
        Category::FourOfAKind => Hand::quads(value, rest.next()),
        _ => Hand::new(category, value, rest.next(), rest.next()),
    };
    Some(hand)
}

/// Straight flush: a five-card run inside the flush suit.
pub fn find_straight_flush(pool: &Pool) -> Option<Hand> {
    let suit = pool.flush_suit()?;
    let top = highest_run(pool.suit_values[suit.index()])?;
    Some(Hand::single(Category::StraightFlush, top))
}

/// Four of a kind; the best remaining value is the side card.
pub fn find_quads(pool: &Pool) -> Option<Hand> {
    find_multiple(pool, 4, Category::FourOfAKind)
}

/// Full house: trips plus any other value seen at least twice.
pub fn find_full_house(pool: &Pool) -> Option<Hand> {
    let trips = pool.highest_with_count(3)?;
    let pair = pool
        .values_desc()
        .find(|&v| v != trips && pool.count(v) >= 2)?;
    let kicker = pool.best_excluding(&[trips, pair]).next();
    Some(Hand::new(Category::FullHouse, trips, Some(pair), kicker))
}

/// Flush: five or more cards of one suit, ranked by the top card only.
pub fn find_flush(pool: &Pool) -> Option<Hand> {
    let suit = pool.flush_suit()?;
    let top = (VALUE_2..=VALUE_A)
        .rev()
        .find(|&v| pool.suit_values[suit.index()] & (1 << v) != 0)?;
    Some(Hand::single(Category::Flush, top))
}

/// Straight: five consecutive distinct values, ace high or low.
pub fn find_straight(pool: &Pool) -> Option<Hand> {
    let top = highest_run(pool.value_mask())?;
    Some(Hand::single(Category::Straight, top))
}

/// Three of a kind with the two best remaining values.
pub fn find_trips(pool: &Pool) -> Option<Hand> {
    find_multiple(pool, 3, Category::ThreeOfAKind)
}

/// Two pair: the two highest values seen at least twice.
pub fn find_two_pair(pool: &Pool) -> Option<Hand> {
    let mut pairs = pool.values_desc().filter(|&v| pool.count(v) >= 2);
    let high = pairs.next()?;
    let low = pairs.next()?;
    let kicker = pool.best_excluding(&[high, low]).next();
    Some(Hand::new(Category::TwoPair, high, Some(low), kicker))
}

/// One pair with the two best remaining values.
pub fn find_pair(pool: &Pool) -> Option<Hand> {
    find_multiple(pool, 2, Category::Pair)
}

/// High card: the three highest values. Matches any non-empty pool.
pub fn find_high_card(pool: &Pool) -> Option<Hand> {
    let mut values = pool.values_desc();
    let high = values.next()?;
    Some(Hand::new(Category::HighCard, high, values.next(), values.next()))
}
