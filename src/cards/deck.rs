//! A 52-card deck that shrinks by removal only.

use std::fmt;

use rand::Rng;

use super::card::Card;
use crate::error::{Result, SimError};

/// A deck of playing cards.
///
/// Cards leave the deck either by a uniformly random deal or by a targeted
/// removal. No card identity is ever present twice. Removals do not keep the
/// order of the remaining cards.
#[derive(Clone, PartialEq, Eq)]
pub struct Deck {
    /// Remaining cards.
    cards: Vec<Card>,
    /// Bitmask of remaining cards (for fast membership checks).
    live_mask: u64,
}

impl Deck {
    /// Create a full deck in standard order (2c, 2d, ..., As).
    pub fn new() -> Self {
        Self {
            cards: (0..52).map(Card::from_id).collect(),
            live_mask: (1u64 << 52) - 1,
        }
    }

    /// Create a deck with specific cards removed.
    ///
    /// Fails with `UnknownCard` if a dead card is listed twice.
    pub fn without(dead_cards: &[Card]) -> Result<Self> {
        let mut deck = Self::new();
        for &card in dead_cards {
            deck.remove(card)?;
        }
        Ok(deck)
    }

    /// Deal a uniformly random card and remove it from the deck.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card> {
        if self.cards.is_empty() {
            return Err(SimError::EmptyDeck);
        }
        let index = rng.gen_range(0..self.cards.len());
        let card = self.cards.swap_remove(index);
        self.live_mask &= !(1u64 << card.id());
        Ok(card)
    }

    /// Deal `n` random cards.
    pub fn deal_n<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Card>> {
        (0..n).map(|_| self.deal(rng)).collect()
    }

    /// Remove a specific card.
    pub fn remove(&mut self, card: Card) -> Result<()> {
        if !self.contains(card) {
            return Err(SimError::UnknownCard(card));
        }
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.swap_remove(index);
        }
        self.live_mask &= !(1u64 << card.id());
        Ok(())
    }

    /// Remove a specific card given by its identity string, e.g. `"Ks"`.
    pub fn remove_id(&mut self, id: &str) -> Result<()> {
        self.remove(id.parse()?)
    }

    /// Check if a card is still in the deck.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.live_mask & (1u64 << card.id()) != 0
    }

    /// Get the number of remaining cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is exhausted.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over the remaining cards.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::ensure_distinct;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::new();
        assert_eq!(deck.len(), 52);
        assert!(ensure_distinct(&deck).is_ok());

        let card = deck.deal(&mut rng).unwrap();
        assert_eq!(deck.len(), 51);
        assert!(!deck.contains(card));

        // Deal remaining cards
        let cards = deck.deal_n(51, &mut rng).unwrap();
        assert_eq!(cards.len(), 51);
        assert!(deck.is_empty());
        assert!(matches!(deck.deal(&mut rng), Err(SimError::EmptyDeck)));

        let mut all = cards;
        all.push(card);
        assert!(ensure_distinct(&all).is_ok());
    }

    #[test]
    fn test_deck_without() {
        let dead: Vec<Card> = vec!["As".parse().unwrap(), "Ah".parse().unwrap()];
        let deck = Deck::without(&dead).unwrap();
        assert_eq!(deck.len(), 50);
        assert!(!deck.contains(dead[0]));

        let twice = vec![dead[0], dead[0]];
        assert!(matches!(Deck::without(&twice), Err(SimError::UnknownCard(_))));
    }

    #[test]
    fn test_remove_by_card_and_id() {
        let mut deck = Deck::new();
        deck.remove("2c".parse().unwrap()).unwrap();
        assert_eq!(deck.len(), 51);
        assert!(deck.iter().all(|c| c.to_string() != "2c"));

        deck.remove_id("Ks").unwrap();
        assert_eq!(deck.len(), 50);
        assert!(deck.iter().all(|c| c.to_string() != "Ks"));

        assert!(matches!(deck.remove_id("Ks"), Err(SimError::UnknownCard(_))));
        assert!(matches!(deck.remove_id("Xx"), Err(SimError::InvalidCard(_))));
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn test_remove_leaves_exact_remainder() {
        let removed: Vec<Card> = ["2c", "9h", "As"].iter().map(|id| id.parse().unwrap()).collect();
        let deck = Deck::without(&removed).unwrap();
        let mut ids: Vec<u8> = deck.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        let expected: Vec<u8> = (0..52)
            .filter(|&id| !removed.iter().any(|c| c.id() == id))
            .collect();
        assert_eq!(ids, expected);
        assert!(removed.iter().all(|&c| !deck.contains(c)));
    }

    #[test]
    fn test_deal_never_repeats() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut deck = Deck::without(&["Ac".parse::<Card>().unwrap()]).unwrap();
            let mut dealt = Vec::new();
            while !deck.is_empty() {
                let before = deck.len();
                dealt.push(deck.deal(&mut rng).unwrap());
                assert_eq!(deck.len(), before - 1);
            }
            assert_eq!(dealt.len(), 51);
            assert!(ensure_distinct(&dealt).is_ok());
            assert!(!dealt.iter().any(|c| c.to_string() == "Ac"));
        }
    }
}
