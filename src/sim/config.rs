//! Configuration for simulation runs.
//!
//! `SimConfig` controls how many trials run and how they are scheduled.
//! `Scenario` describes a complete request (cards, seats and trial counts) and
//! can be loaded from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{parse_cards, Card, HoleCards};
use crate::error::{Result, SimError};

/// Trials for a single-player frequency run when none is given.
pub const DEFAULT_SINGLE_TRIALS: u64 = 100_000;

/// Trials for a multiplayer win-rate run when none is given.
pub const DEFAULT_MULTIPLAYER_TRIALS: u64 = 10_000;

/// Trials handed to a worker at a time.
pub const DEFAULT_BATCH_SIZE: u64 = 1_024;

/// Configuration for a simulation run.
///
/// # Example
/// ```
/// use holdem_sim::sim::SimConfig;
///
/// let config = SimConfig::default().with_trials(5_000).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of independent trials to run.
    pub trials: u64,

    /// Random seed for reproducibility.
    ///
    /// With a seed, every batch derives its own generator from
    /// `seed + batch_index`, so results do not depend on the thread count.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of worker threads.
    ///
    /// `None` uses the global rayon pool (all available cores).
    #[serde(default)]
    pub num_threads: Option<usize>,

    /// Trials per batch; the unit of work given to one worker.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
}

fn default_batch_size() -> u64 {
    DEFAULT_BATCH_SIZE
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_SINGLE_TRIALS,
            seed: None,
            num_threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SimConfig {
    /// Create a new SimConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for a single-player frequency run.
    pub fn single_default() -> Self {
        Self::default()
    }

    /// Defaults for a multiplayer win-rate run.
    pub fn multiplayer_default() -> Self {
        Self {
            trials: DEFAULT_MULTIPLAYER_TRIALS,
            ..Default::default()
        }
    }

    /// Builder method: set number of trials.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set batch size.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.num_threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A thread count of zero was requested.
    #[error("Thread count must be at least 1")]
    ZeroThreads,
    /// A batch size of zero was requested.
    #[error("Batch size must be at least 1")]
    ZeroBatchSize,
}

/// A full simulation request: known cards, seats and trial counts.
///
/// Cards are kept as identity strings until [`Scenario::resolve`] so that an
/// invalid identity surfaces as `SimError::InvalidCard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Hero's hole cards, e.g. `["As", "Kd"]`.
    pub hole: Vec<String>,

    /// Known community cards (0-5).
    #[serde(default)]
    pub board: Vec<String>,

    /// Known opponent hole cards; an empty entry is dealt every trial.
    #[serde(default)]
    pub opponents: Vec<Vec<String>>,

    /// Number of opponents in the multiplayer run.
    #[serde(default = "default_opponent_count")]
    pub opponent_count: usize,

    /// Trials for the single-player run.
    #[serde(default = "default_single_trials")]
    pub single_trials: u64,

    /// Trials for the multiplayer run.
    #[serde(default = "default_multiplayer_trials")]
    pub multiplayer_trials: u64,

    /// Random seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Worker thread count.
    #[serde(default)]
    pub num_threads: Option<usize>,
}

fn default_opponent_count() -> usize {
    1
}

fn default_single_trials() -> u64 {
    DEFAULT_SINGLE_TRIALS
}

fn default_multiplayer_trials() -> u64 {
    DEFAULT_MULTIPLAYER_TRIALS
}

/// A scenario with every card identity parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScenario {
    /// Hero's hole cards.
    pub hero: HoleCards,
    /// Known community cards.
    pub board: Vec<Card>,
    /// Opponent seats; `None` is dealt every trial.
    pub opponents: Vec<Option<HoleCards>>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a scenario from a JSON string.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ConfigError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.single_config().validate()?;
        Ok(scenario)
    }

    /// Parse every card identity.
    pub fn resolve(&self) -> Result<ResolvedScenario> {
        let hero = HoleCards::from_ids(&self.hole.iter().map(String::as_str).collect::<Vec<_>>())?;
        let board = parse_cards(&self.board)?;
        let opponents = self
            .opponents
            .iter()
            .map(|ids| parse_seat(ids.as_slice()))
            .collect::<Result<Vec<_>>>()?;
        Ok(ResolvedScenario {
            hero,
            board,
            opponents,
        })
    }

    /// Configuration for the single-player run.
    pub fn single_config(&self) -> SimConfig {
        self.config(self.single_trials)
    }

    /// Configuration for the multiplayer run.
    pub fn multiplayer_config(&self) -> SimConfig {
        self.config(self.multiplayer_trials)
    }

    fn config(&self, trials: u64) -> SimConfig {
        SimConfig {
            trials,
            seed: self.seed,
            num_threads: self.num_threads,
            ..Default::default()
        }
    }
}

/// Parse one opponent seat: two identities, or none for a seat dealt every trial.
pub(crate) fn parse_seat<S: AsRef<str>>(ids: &[S]) -> Result<Option<HoleCards>> {
    match ids {
        [] => Ok(None),
        [a, b] => HoleCards::parse(a.as_ref(), b.as_ref()).map(Some),
        _ => Err(SimError::WrongHoleCardCount(ids.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.trials, DEFAULT_SINGLE_TRIALS);
        assert_eq!(SimConfig::multiplayer_default().trials, DEFAULT_MULTIPLAYER_TRIALS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            SimConfig::default().with_threads(0).validate(),
            Err(ConfigError::ZeroThreads)
        ));
        assert!(matches!(
            SimConfig::default().with_batch_size(0).validate(),
            Err(ConfigError::ZeroBatchSize)
        ));
        assert!(SimConfig::default().with_threads(2).validate().is_ok());
    }

    #[test]
    fn test_config_json_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"trials": 500}"#).unwrap();
        assert_eq!(config.trials, 500);
        assert_eq!(config.seed, None);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_scenario_from_json() {
        let json = r#"{
            "hole": ["As", "Kd"],
            "board": ["2c", "3h", "Qs"],
            "opponents": [["Jd", "8c"], []],
            "opponent_count": 3,
            "seed": 7
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.single_trials, DEFAULT_SINGLE_TRIALS);
        assert_eq!(scenario.multiplayer_config().trials, DEFAULT_MULTIPLAYER_TRIALS);
        assert_eq!(scenario.multiplayer_config().seed, Some(7));

        let resolved = scenario.resolve().unwrap();
        assert_eq!(resolved.hero.to_string(), "AsKd");
        assert_eq!(resolved.board.len(), 3);
        assert_eq!(resolved.opponents.len(), 2);
        assert!(resolved.opponents[0].is_some());
        assert!(resolved.opponents[1].is_none());
    }

    #[test]
    fn test_scenario_invalid_card() {
        let scenario = Scenario::from_json_str(r#"{"hole": ["As", "Kd"], "board": ["Ss"]}"#).unwrap();
        assert!(matches!(scenario.resolve(), Err(SimError::InvalidCard(_))));

        let scenario = Scenario::from_json_str(r#"{"hole": ["As"]}"#).unwrap();
        assert!(matches!(
            scenario.resolve(),
            Err(SimError::WrongHoleCardCount(1))
        ));

        let json = r#"{"hole": ["As", "Kd"], "opponents": [["Ac", "Td", "Ks"]]}"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert!(matches!(
            scenario.resolve(),
            Err(SimError::WrongHoleCardCount(3))
        ));
    }

    #[test]
    fn test_scenario_parse_errors() {
        assert!(matches!(
            Scenario::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Scenario::from_json_str(r#"{"hole": ["As", "Kd"], "num_threads": 0}"#),
            Err(ConfigError::ZeroThreads)
        ));
        assert!(matches!(
            Scenario::from_json_file("/nonexistent/scenario.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
