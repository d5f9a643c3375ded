//! Card model: cards, hole cards and the deck.
//!
//! ## Modules
//!
//! - `card`: Card, suit and hole-card representations, identity parsing
//! - `deck`: 52-card deck with random and targeted removal

pub mod card;
pub mod deck;

pub use card::{
    ensure_distinct, parse_cards, value_char, Card, HoleCards, Suit, VALUE_2, VALUE_5, VALUE_A,
};
pub use deck::Deck;
