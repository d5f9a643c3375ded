//! Per-run tallies and results.
//!
//! Tallies are owned by one batch of trials and merged by integer addition
//! once every batch has finished, so no counter is ever shared between
//! workers.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::HoleCards;
use crate::eval::{Category, Showdown};

/// A tally that can be combined with another tally of the same run.
pub trait Tally: Send + Sized {
    /// Number of trials recorded.
    fn trials(&self) -> u64;
    /// Combine two tallies.
    fn merge(self, other: Self) -> Self;
}

/// Final hand categories counted over a single-player run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandFrequencies {
    /// Trials completed.
    pub trials: u64,
    /// Occurrences per category, ordered high card .. straight flush.
    pub counts: [u64; 9],
}

impl HandFrequencies {
    /// Create empty frequencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one trial's final category.
    pub fn record(&mut self, category: Category) {
        self.trials += 1;
        self.counts[category.index()] += 1;
    }

    /// Occurrences of a category.
    pub fn count(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    /// Share of trials ending in a category (0.0 to 1.0).
    pub fn probability(&self, category: Category) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.count(category) as f64 / self.trials as f64
    }

    /// The category seen most often; ties go to the stronger category.
    pub fn most_likely(&self) -> Option<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| self.count(c) > 0)
            .max_by_key(|&c| (self.count(c), c))
    }

    /// Iterate over `(category, count)` pairs, weakest category first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.count(c)))
    }

    /// `(trials, counts)` in the order high card .. straight flush.
    pub fn into_parts(self) -> (u64, [u64; 9]) {
        (self.trials, self.counts)
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        save_json(self, path)
    }
}

impl Tally for HandFrequencies {
    fn trials(&self) -> u64 {
        self.trials
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        for (count, extra) in self.counts.iter_mut().zip(other.counts) {
            *count += extra;
        }
        self
    }
}

/// Win counts for one multiplayer run, indexed by seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinTally {
    trials: u64,
    chops: u64,
    wins: Vec<u64>,
}

impl WinTally {
    /// Create an empty tally for `seats` contestants.
    pub fn new(seats: usize) -> Self {
        Self {
            trials: 0,
            chops: 0,
            wins: vec![0; seats],
        }
    }

    /// Record one showdown.
    pub fn record(&mut self, outcome: Showdown) {
        self.trials += 1;
        match outcome {
            Showdown::Winner(seat) => self.wins[seat] += 1,
            Showdown::Chop => self.chops += 1,
        }
    }

    /// Wins per seat.
    pub fn wins(&self) -> &[u64] {
        &self.wins
    }

    /// Showdowns without a unique winner.
    pub fn chops(&self) -> u64 {
        self.chops
    }
}

impl Tally for WinTally {
    fn trials(&self) -> u64 {
        self.trials
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        self.chops += other.chops;
        for (wins, extra) in self.wins.iter_mut().zip(other.wins) {
            *wins += extra;
        }
        self
    }
}

/// One contestant's outcome over a multiplayer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestantResult {
    /// Seat index; seat 0 is the hero.
    pub seat: usize,
    /// Fixed hole cards, or `None` if dealt every trial.
    pub hole: Option<HoleCards>,
    /// Showdowns won outright.
    pub wins: u64,
}

/// Outcome of a multiplayer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiwayResult {
    /// Trials completed.
    pub trials: u64,
    /// Showdowns that ended in a chop.
    pub chops: u64,
    /// Contestants in seat order, hero first.
    pub contestants: Vec<ContestantResult>,
}

impl MultiwayResult {
    /// Combine seat assignments with a finished tally.
    pub fn from_tally(seats: &[Option<HoleCards>], tally: WinTally) -> Self {
        let contestants = seats
            .iter()
            .zip(tally.wins())
            .enumerate()
            .map(|(seat, (&hole, &wins))| ContestantResult { seat, hole, wins })
            .collect();
        Self {
            trials: tally.trials,
            chops: tally.chops,
            contestants,
        }
    }

    /// The hero's result.
    pub fn hero(&self) -> Option<&ContestantResult> {
        self.contestants.first()
    }

    /// Share of trials a seat won outright (0.0 to 1.0).
    pub fn win_rate(&self, seat: usize) -> f64 {
        match self.contestants.get(seat) {
            Some(c) if self.trials > 0 => c.wins as f64 / self.trials as f64,
            _ => 0.0,
        }
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        save_json(self, path)
    }
}

fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())
}
