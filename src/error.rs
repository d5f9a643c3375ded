//! Error types shared by the card model, classifier and simulation engine.

use thiserror::Error;

use crate::cards::Card;
use crate::sim::config::ConfigError;

/// Errors raised while validating input or running a simulation.
///
/// Validation errors (`InvalidCard`, `DuplicateCard`, board and seat limits)
/// are reported before any trial runs. `EmptyDeck` and `IncompleteHand`
/// indicate a broken invariant inside a trial and abort the run.
#[derive(Debug, Error)]
pub enum SimError {
    /// A card identity did not parse to a known rank and suit.
    #[error("invalid card identity {0:?}")]
    InvalidCard(String),

    /// The same card appears more than once across hole and board cards.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),

    /// A draw was requested from a deck with no cards left.
    #[error("cannot deal from an empty deck")]
    EmptyDeck,

    /// A targeted removal named a card that is not in the deck.
    #[error("card {0} is not in the deck")]
    UnknownCard(Card),

    /// A hole-card entry did not hold exactly two cards.
    #[error("hole cards need exactly 2 cards, got {0}")]
    WrongHoleCardCount(usize),

    /// More than five community cards were supplied.
    #[error("board has {0} cards, at most 5 are allowed")]
    TooManyBoardCards(usize),

    /// Opponent count outside `1..=MAX_OPPONENTS`.
    #[error("opponent count {0} is out of range (1-{max})", max = crate::sim::MAX_OPPONENTS)]
    InvalidOpponentCount(usize),

    /// More opponent hole-card pairs than opponent seats.
    #[error("{given} opponent hands supplied for {seats} opponent seats")]
    TooManyOpponentHands {
        /// Number of hole-card pairs supplied.
        given: usize,
        /// Number of opponent seats in the run.
        seats: usize,
    },

    /// The classifier produced no hand for a completed pool.
    #[error("no hand could be classified from {0} cards")]
    IncompleteHand(usize),

    /// Invalid simulation configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
