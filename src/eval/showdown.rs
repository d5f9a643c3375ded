//! Showdown resolution between classified hands.
//!
//! The winner is the unique best category. Between hands of the same
//! category the chain from [`Category::tie_breaks`] is walked one step at a
//! time: each step keeps only the contestants holding the highest value and
//! stops as soon as one is left. Contestants still tied when the chain runs
//! out chop, and a chop awards no win to anyone.

use serde::{Deserialize, Serialize};

use super::hand::Hand;

/// Outcome of one showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Showdown {
    /// Index of the unique winning contestant.
    Winner(usize),
    /// No unique winner.
    Chop,
}

impl Showdown {
    /// Index of the winner, if any.
    pub fn winner(self) -> Option<usize> {
        match self {
            Showdown::Winner(index) => Some(index),
            Showdown::Chop => None,
        }
    }
}

/// Resolve a showdown between contestants' hands.
pub fn score(hands: &[Hand]) -> Showdown {
    let best = match hands.iter().map(|h| h.category()).max() {
        Some(category) => category,
        None => return Showdown::Chop,
    };

    let mut candidates: Vec<usize> = (0..hands.len())
        .filter(|&i| hands[i].category() == best)
        .collect();

    for &step in best.tie_breaks() {
        if candidates.len() == 1 {
            break;
        }
        let top = candidates
            .iter()
            .map(|&i| hands[i].tie_break_value(step))
            .max()
            .flatten();
        candidates.retain(|&i| hands[i].tie_break_value(step) == top);
    }

    match candidates.as_slice() {
        [winner] => Showdown::Winner(*winner),
        _ => Showdown::Chop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::hand::Category;

    fn hand(category: Category, primary: u8, secondary: Option<u8>, kicker: Option<u8>) -> Hand {
        Hand::new(category, primary, secondary, kicker)
    }

    #[test]
    fn test_single_winner_by_category() {
        let hands = [
            hand(Category::ThreeOfAKind, 8, None, Some(10)),
            hand(Category::HighCard, 13, Some(10), Some(9)),
            hand(Category::Pair, 8, None, Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(0));
    }

    #[test]
    fn test_flush_high_card_wins() {
        let hands = [
            Hand::single(Category::Flush, 13),
            Hand::single(Category::Flush, 9),
            hand(Category::Pair, 8, None, Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(0));
    }

    #[test]
    fn test_flush_chop() {
        let hands = [
            Hand::single(Category::Flush, 13),
            Hand::single(Category::Flush, 13),
            hand(Category::Pair, 8, None, Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Chop);
    }

    #[test]
    fn test_full_house_trips_decide() {
        let hands = [
            hand(Category::FullHouse, 13, Some(5), None),
            hand(Category::FullHouse, 9, Some(6), None),
            hand(Category::Pair, 8, None, Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(0));
    }

    #[test]
    fn test_full_house_pair_decides() {
        let hands = [
            hand(Category::FullHouse, 13, Some(5), None),
            hand(Category::FullHouse, 13, Some(6), None),
            hand(Category::Pair, 8, None, Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(1));
    }

    #[test]
    fn test_full_house_ignores_kicker() {
        let hands = [
            hand(Category::FullHouse, 13, Some(6), Some(2)),
            hand(Category::FullHouse, 13, Some(6), Some(9)),
        ];
        assert_eq!(score(&hands), Showdown::Chop);
    }

    #[test]
    fn test_trips_second_card_decides() {
        let hands = [
            hand(Category::ThreeOfAKind, 13, Some(5), Some(3)),
            hand(Category::ThreeOfAKind, 10, Some(6), Some(5)),
            hand(Category::Pair, 8, None, Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(0));
    }

    #[test]
    fn test_trips_kicker_decides() {
        let hands = [
            hand(Category::ThreeOfAKind, 13, Some(5), Some(3)),
            hand(Category::ThreeOfAKind, 13, Some(5), Some(4)),
            hand(Category::Pair, 8, None, Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(1));
    }

    #[test]
    fn test_quads_side_card_decides() {
        let hands = [
            Hand::quads(5, Some(3)),
            Hand::quads(5, Some(4)),
            hand(Category::Pair, 8, Some(12), Some(9)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(1));
    }

    #[test]
    fn test_quads_same_side_card_chop() {
        let hands = [Hand::quads(9, Some(14)), Hand::quads(9, Some(14))];
        assert_eq!(score(&hands), Showdown::Chop);
    }

    #[test]
    fn test_narrowing_excludes_lower_candidates() {
        // The third player has the best kicker but loses at the second step.
        let hands = [
            hand(Category::Pair, 10, Some(14), Some(4)),
            hand(Category::Pair, 10, Some(14), Some(6)),
            hand(Category::Pair, 10, Some(13), Some(12)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(1));
    }

    #[test]
    fn test_missing_value_loses() {
        let hands = [
            hand(Category::TwoPair, 10, Some(4), None),
            hand(Category::TwoPair, 10, Some(4), Some(2)),
        ];
        assert_eq!(score(&hands), Showdown::Winner(1));
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(score(&[]), Showdown::Chop);
        assert_eq!(score(&[Hand::single(Category::Straight, 5)]), Showdown::Winner(0));
        assert_eq!(Showdown::Winner(2).winner(), Some(2));
        assert_eq!(Showdown::Chop.winner(), None);
    }
}
