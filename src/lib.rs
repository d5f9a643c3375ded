//! # Hold'em Simulator
//!
//! Monte Carlo estimation for Texas Hold'em: how often a starting hand ends
//! up in each hand category, and how often it wins a showdown against up to
//! six opponents.
//!
//! ## Features
//!
//! - **Hand Classifier**: Ordered detectors classify any 5-7 card pool
//! - **Showdown Scoring**: Category-specific tie-breaks with chops
//! - **Parallel Trials**: Batches run on rayon with per-batch tallies
//! - **Reproducible Runs**: Seeded runs give the same counts on any thread count
//! - **Cancellation**: A shared flag stops a long run between trials
//!
//! ## Quick Start
//!
//! ```
//! use holdem_sim::sim::{run_multiplayer, run_single};
//!
//! // Category frequencies for Ace-Ten on a three-card board
//! let (trials, counts) = run_single(&["Ac", "Td"], &["2c", "3h", "Qs"], 1_000).unwrap();
//! assert_eq!(counts.iter().sum::<u64>(), trials);
//!
//! // Pocket aces against one random hand
//! let result = run_multiplayer(&["As", "Ad"], &[], &[], 1, 1_000).unwrap();
//! assert!(result.win_rate(0) > 0.5);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Cards, hole cards and the deck
//! - [`eval`]: Hand classification and showdown scoring
//! - [`sim`]: Configuration, tallies and the simulation engine
//! - [`error`]: Crate error type
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Simulator (rayon batches)                    │
//! │  - Validation before any trial   - Seeded per-batch RNG         │
//! │  - Per-batch tallies             - Merge by addition            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ per trial
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌────────────┐        ┌───────────┐
//!    │  Deck   │         │ Classifier │        │ Showdown  │
//!    │  draws  │         │  (ordered) │        │  scorer   │
//!    └─────────┘         └────────────┘        └───────────┘
//! ```

#![warn(missing_docs)]

/// Card model.
///
/// Cards, suits, hole cards, identity parsing and the deck.
pub mod cards;

/// Crate error type.
pub mod error;

/// Hand evaluation module.
///
/// Classifies pools of 5-7 cards and resolves showdowns.
pub mod eval;

/// Simulation module.
///
/// Runs single-player and multiplayer Monte Carlo trials.
pub mod sim;

// Re-export commonly used types at crate root for convenience
pub use cards::{Card, Deck, HoleCards, Suit};
pub use error::{Result, SimError};
pub use eval::{classify, score, Category, Hand, Showdown};
pub use sim::{classify_ids, HandFrequencies, MultiwayResult, Scenario, SimConfig, Simulator};
