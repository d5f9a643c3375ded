//! Hand evaluation.
//!
//! ## Modules
//!
//! - `hand`: Hand categories and classified hands
//! - `classifier`: Ordered detectors that classify a 5-7 card pool
//! - `showdown`: Category-specific tie-breaking between contestants

pub mod classifier;
pub mod hand;
pub mod showdown;

pub use classifier::{classify, Detector, Pool, CLASSIFIERS, MIN_HAND_CARDS};
pub use hand::{Category, Hand, TieBreak};
pub use showdown::{score, Showdown};
