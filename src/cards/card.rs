//! Card representation.
//!
//! - `Card`: a single playing card, identified by a two-character string
//!   such as `"As"` or `"Td"`
//! - `Suit`: one of the four suits
//! - `HoleCards`: a player's two private cards

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Lowest card value (deuce).
pub const VALUE_2: u8 = 2;
/// Card value of a five, the high card of the wheel.
pub const VALUE_5: u8 = 5;
/// Highest card value (ace).
pub const VALUE_A: u8 = 14;

/// Rank symbols, indexed by `value - 2`.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit symbols, indexed by suit.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Rank symbol for a card value (2-14).
pub fn value_char(value: u8) -> char {
    debug_assert!((VALUE_2..=VALUE_A).contains(&value), "value must be 2-14");
    RANK_CHARS[(value - VALUE_2) as usize]
}

/// Suit of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Clubs (`c`).
    Clubs = 0,
    /// Diamonds (`d`).
    Diamonds = 1,
    /// Hearts (`h`).
    Hearts = 2,
    /// Spades (`s`).
    Spades = 3,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Suit from its index (0-3).
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 3) as usize]
    }

    /// Index of the suit (0-3).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Symbol used in card identities.
    pub fn symbol(self) -> char {
        SUIT_CHARS[self.index()]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    /// Card index 0-51: (value - 2) * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from a value (2-14) and suit.
    #[inline]
    pub fn new(value: u8, suit: Suit) -> Self {
        debug_assert!((VALUE_2..=VALUE_A).contains(&value), "value must be 2-14");
        Self {
            id: (value - VALUE_2) * 4 + suit as u8,
        }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's value (2-14, ace high).
    #[inline]
    pub fn value(&self) -> u8 {
        self.id / 4 + VALUE_2
    }

    /// Get the card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        Suit::from_index(self.id % 4)
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[(self.id / 4) as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        self.suit().symbol()
    }
}

impl FromStr for Card {
    type Err = SimError;

    /// Parse a card from an identity like "As", "Kh", "2c".
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SimError::InvalidCard(s.to_string());
        let mut chars = s.chars();
        let (rank, suit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => (rank, suit),
            _ => return Err(invalid()),
        };

        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == rank.to_ascii_uppercase())
            .ok_or_else(invalid)?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == suit.to_ascii_lowercase())
            .ok_or_else(invalid)?;

        Ok(Self::from_id((rank * 4 + suit) as u8))
    }
}

impl TryFrom<String> for Card {
    type Error = SimError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Card; 2]", into = "[Card; 2]")]
pub struct HoleCards {
    cards: [Card; 2],
}

impl HoleCards {
    /// Create hole cards from two distinct cards.
    pub fn new(card1: Card, card2: Card) -> Result<Self> {
        if card1 == card2 {
            return Err(SimError::DuplicateCard(card1));
        }
        Ok(Self {
            cards: [card1, card2],
        })
    }

    /// Parse hole cards from two identities, e.g. `("As", "Kd")`.
    pub fn parse(card1: &str, card2: &str) -> Result<Self> {
        Self::new(card1.parse()?, card2.parse()?)
    }

    /// Parse hole cards from a slice of exactly two identities.
    pub fn from_ids(ids: &[&str]) -> Result<Self> {
        match ids {
            [a, b] => Self::parse(a, b),
            _ => Err(SimError::WrongHoleCardCount(ids.len())),
        }
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        self.cards
    }

    /// Check if a card is one of these hole cards.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

impl TryFrom<[Card; 2]> for HoleCards {
    type Error = SimError;

    fn try_from(cards: [Card; 2]) -> Result<Self> {
        Self::new(cards[0], cards[1])
    }
}

impl From<HoleCards> for [Card; 2] {
    fn from(hole: HoleCards) -> Self {
        hole.cards
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.cards[0], self.cards[1])
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse a list of card identities, failing on the first invalid one.
pub fn parse_cards<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Card>> {
    ids.iter().map(|id| id.as_ref().parse()).collect()
}

/// Fail with `DuplicateCard` if any card appears more than once.
pub fn ensure_distinct<'a, I>(cards: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut seen = FxHashSet::default();
    for &card in cards {
        if !seen.insert(card) {
            return Err(SimError::DuplicateCard(card));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let ace_spades = Card::new(VALUE_A, Suit::Spades);
        assert_eq!(ace_spades.value(), 14);
        assert_eq!(ace_spades.suit(), Suit::Spades);
        assert_eq!(ace_spades.to_string(), "As");

        let two_clubs = Card::new(VALUE_2, Suit::Clubs);
        assert_eq!(two_clubs.value(), 2);
        assert_eq!(two_clubs.suit(), Suit::Clubs);
        assert_eq!(two_clubs.to_string(), "2c");
        assert_eq!(two_clubs.id(), 0);
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!("As".parse::<Card>().unwrap().to_string(), "As");
        assert_eq!("Kh".parse::<Card>().unwrap().value(), 13);
        assert_eq!("Td".parse::<Card>().unwrap().value(), 10);
        assert_eq!("as".parse::<Card>().unwrap().to_string(), "As");
        assert!(matches!("Ss".parse::<Card>(), Err(SimError::InvalidCard(_))));
        assert!(matches!("Of".parse::<Card>(), Err(SimError::InvalidCard(_))));
        assert!("A".parse::<Card>().is_err());
        assert!("Asd".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_ids_are_unique() {
        let mut seen = FxHashSet::default();
        for id in 0..52u8 {
            let card = Card::from_id(id);
            assert!(seen.insert(card.to_string()));
            assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
        }
    }

    #[test]
    fn test_card_serde() {
        let card: Card = serde_json::from_str("\"Qh\"").unwrap();
        assert_eq!(card.value(), 12);
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"Qh\"");
        assert!(serde_json::from_str::<Card>("\"1x\"").is_err());
    }

    #[test]
    fn test_hole_cards() {
        let hole = HoleCards::parse("Ah", "Ks").unwrap();
        assert!(hole.contains("Ah".parse().unwrap()));
        assert_eq!(hole.to_string(), "AhKs");

        assert!(matches!(
            HoleCards::parse("Ah", "Ah"),
            Err(SimError::DuplicateCard(_))
        ));
        assert!(matches!(
            HoleCards::from_ids(&["Ah"]),
            Err(SimError::WrongHoleCardCount(1))
        ));
        assert!(matches!(
            HoleCards::from_ids(&["Ac", "Td", "Ks"]),
            Err(SimError::WrongHoleCardCount(3))
        ));
    }

    #[test]
    fn test_duplicate_detection() {
        let cards = parse_cards(&["3c", "As", "3c", "Jd", "9h", "4s", "8s"]).unwrap();
        match ensure_distinct(&cards) {
            Err(SimError::DuplicateCard(card)) => assert_eq!(card.to_string(), "3c"),
            other => panic!("expected duplicate, got {:?}", other),
        }

        let cards = parse_cards(&["2c", "7s", "Jh", "3c", "6d", "4h", "5s"]).unwrap();
        assert!(ensure_distinct(&cards).is_ok());
    }

    #[test]
    fn test_invalid_card_in_list() {
        let result = parse_cards(&["3c", "As", "9c", "Jd", "9h", "4s", "Ss"]);
        assert!(matches!(result, Err(SimError::InvalidCard(id)) if id == "Ss"));
    }
}
