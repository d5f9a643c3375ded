//! Monte Carlo simulation.
//!
//! ## Modules
//!
//! - `config`: Run configuration and JSON scenarios
//! - `stats`: Per-run tallies and serialisable results
//! - `engine`: Parallel trial execution for single-player and multiplayer runs

pub mod config;
pub mod engine;
pub mod stats;

/// Most opponents a multiplayer run can seat.
pub const MAX_OPPONENTS: usize = 6;

pub use config::{
    ConfigError, ResolvedScenario, Scenario, SimConfig, DEFAULT_BATCH_SIZE,
    DEFAULT_MULTIPLAYER_TRIALS, DEFAULT_SINGLE_TRIALS,
};
pub use engine::{classify_ids, run_multiplayer, run_single, Simulator, BOARD_SIZE};
pub use stats::{ContestantResult, HandFrequencies, MultiwayResult, Tally, WinTally};
