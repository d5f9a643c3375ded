//! Classified hands.
//!
//! A `Hand` is the result of classifying a 5-7 card pool: a category plus up
//! to three card values used to break ties between hands of that category.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::value_char;

/// Hand categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// No combination; highest cards play.
    HighCard = 1,
    /// One pair.
    Pair = 2,
    /// Two pairs.
    TwoPair = 3,
    /// Three cards of the same value.
    ThreeOfAKind = 4,
    /// Five consecutive values.
    Straight = 5,
    /// Five cards of one suit.
    Flush = 6,
    /// Three of a kind plus a pair.
    FullHouse = 7,
    /// Four cards of the same value.
    FourOfAKind = 8,
    /// Five consecutive values of one suit.
    StraightFlush = 9,
}

/// One step of a showdown tie-break chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Compare `Hand::primary`.
    Primary,
    /// Compare `Hand::secondary`.
    Secondary,
    /// Compare `Hand::kicker`.
    Kicker,
}

impl Category {
    /// All categories, weakest first. Matches the order of frequency counts.
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    /// Strength of the category (1 = high card, 9 = straight flush).
    #[inline]
    pub fn strength(self) -> u8 {
        self as u8
    }

    /// Position of the category in frequency counts (0-8).
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Get the category name.
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }

    /// The comparisons used to separate two hands of this category.
    ///
    /// Flushes only ever compare their top card, and four of a kind only its
    /// side card.
    pub fn tie_breaks(self) -> &'static [TieBreak] {
        use TieBreak::*;
        match self {
            Category::Flush | Category::Straight | Category::StraightFlush => &[Primary],
            Category::FullHouse => &[Primary, Secondary],
            Category::TwoPair | Category::HighCard | Category::ThreeOfAKind | Category::Pair => {
                &[Primary, Secondary, Kicker]
            }
            Category::FourOfAKind => &[Kicker],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified hand.
///
/// | category        | primary        | secondary   | kicker          |
/// |-----------------|----------------|-------------|-----------------|
/// | straight flush  | top of run     | -           | -               |
/// | four of a kind  | quad value     | -           | side card       |
/// | full house      | trips value    | pair value  | best other card |
/// | flush           | top flush card | -           | -               |
/// | straight        | top of run     | -           | -               |
/// | three of a kind | trips value    | best other  | next other      |
/// | two pair        | top pair       | bottom pair | best other card |
/// | pair            | pair value     | best other  | next other      |
/// | high card       | top card       | second card | third card      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    category: Category,
    primary: u8,
    secondary: Option<u8>,
    kicker: Option<u8>,
}

impl Hand {
    /// Create a hand from its parts.
    pub fn new(category: Category, primary: u8, secondary: Option<u8>, kicker: Option<u8>) -> Self {
        Self {
            category,
            primary,
            secondary,
            kicker,
        }
    }

    /// A hand decided by a single value (straights and flushes).
    pub fn single(category: Category, primary: u8) -> Self {
        Self::new(category, primary, None, None)
    }

    /// Four of a kind with its side card.
    pub fn quads(value: u8, side_card: Option<u8>) -> Self {
        Self::new(Category::FourOfAKind, value, None, side_card)
    }

    /// Get the hand category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The deciding card or set value.
    pub fn primary(&self) -> u8 {
        self.primary
    }

    /// Second pair of two pair, pair of a full house, or best side card.
    pub fn secondary(&self) -> Option<u8> {
        self.secondary
    }

    /// Final tie-breaking card.
    pub fn kicker(&self) -> Option<u8> {
        self.kicker
    }

    /// Side card of four of a kind, the only value compared between quads.
    pub fn quad_kicker(&self) -> Option<u8> {
        match self.category {
            Category::FourOfAKind => self.kicker,
            _ => None,
        }
    }

    /// Value compared at a tie-break step. Missing values compare lowest.
    pub fn tie_break_value(&self, step: TieBreak) -> Option<u8> {
        match step {
            TieBreak::Primary => Some(self.primary),
            TieBreak::Secondary => self.secondary,
            TieBreak::Kicker => self.kicker,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, value_char(self.primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        for pair in Category::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].strength() + 1, pair[1].strength());
        }
        assert_eq!(Category::HighCard.strength(), 1);
        assert_eq!(Category::Pair.strength(), 2);
        assert_eq!(Category::StraightFlush.strength(), 9);
        assert_eq!(Category::StraightFlush.index(), 8);
    }

    #[test]
    fn test_tie_break_chains() {
        assert_eq!(Category::Flush.tie_breaks(), &[TieBreak::Primary]);
        assert_eq!(Category::FourOfAKind.tie_breaks(), &[TieBreak::Kicker]);
        assert_eq!(
            Category::FullHouse.tie_breaks(),
            &[TieBreak::Primary, TieBreak::Secondary]
        );
        assert_eq!(Category::Pair.tie_breaks().len(), 3);
    }

    #[test]
    fn test_quad_kicker() {
        let quads = Hand::quads(5, Some(14));
        assert_eq!(quads.quad_kicker(), Some(14));
        assert_eq!(quads.secondary(), None);
        assert_eq!(quads.tie_break_value(TieBreak::Kicker), Some(14));

        let pair = Hand::new(Category::Pair, 12, Some(11), Some(9));
        assert_eq!(pair.quad_kicker(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Hand::single(Category::Flush, 14).to_string(), "Flush-A");
        assert_eq!(Hand::single(Category::Straight, 5).to_string(), "Straight-5");
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&Category::StraightFlush).unwrap();
        assert_eq!(json, "\"straight_flush\"");
    }
}
