//! Monte Carlo simulation engine.
//!
//! A run is split into batches of `SimConfig::batch_size` trials executed on
//! rayon workers. Each batch clones its own template deck, draws from its own
//! generator and fills its own tally, so no trial can observe another trial's
//! cards. Finished tallies are merged by addition.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::config::{parse_seat, SimConfig};
use super::stats::{HandFrequencies, MultiwayResult, Tally, WinTally};
use super::MAX_OPPONENTS;
use crate::cards::{ensure_distinct, parse_cards, Card, Deck, HoleCards};
use crate::error::{Result, SimError};
use crate::eval::{classify, score, Hand};

/// Community cards on a complete board.
pub const BOARD_SIZE: usize = 5;

/// Runs Monte Carlo trials for a fixed set of known cards.
///
/// # Example
/// ```
/// use holdem_sim::cards::HoleCards;
/// use holdem_sim::sim::{SimConfig, Simulator};
///
/// let hole = HoleCards::parse("As", "Kd").unwrap();
/// let config = SimConfig::default().with_trials(1_000).with_seed(7);
/// let freq = Simulator::new(config).run_single(&hole, &[]).unwrap();
/// assert_eq!(freq.trials, 1_000);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Simulator {
    /// Create a simulator with the given configuration.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Attach a flag that stops the run before the next trial once set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Count final hand categories for one player.
    pub fn run_single(&self, hole: &HoleCards, board: &[Card]) -> Result<HandFrequencies> {
        self.run_single_with_progress(hole, board, |_| {})
    }

    /// Like [`Simulator::run_single`], calling `progress` with each finished
    /// batch's trial count.
    pub fn run_single_with_progress<F>(
        &self,
        hole: &HoleCards,
        board: &[Card],
        progress: F,
    ) -> Result<HandFrequencies>
    where
        F: Fn(u64) + Sync,
    {
        self.config.validate()?;
        check_board(board)?;
        let hole_cards = hole.cards();
        ensure_distinct(hole_cards.iter().chain(board))?;

        let mut known = hole_cards.to_vec();
        known.extend_from_slice(board);
        let template = Deck::without(&known)?;
        log::debug!(
            "single run: hole {} board {:?}, {} live cards",
            hole,
            board,
            template.len()
        );

        let start = Instant::now();
        let freq = self.run_batches(
            HandFrequencies::new,
            |rng: &mut StdRng, freq: &mut HandFrequencies| {
                let mut deck = template.clone();
                let community = complete_board(board, &mut deck, rng)?;
                let hand = evaluate(&hole_cards, &community)?;
                freq.record(hand.category());
                Ok(())
            },
            &progress,
        )?;

        log::info!(
            "single run finished: {} trials in {:.2}s",
            freq.trials,
            start.elapsed().as_secs_f64()
        );
        Ok(freq)
    }

    /// Count showdown wins for the hero and `opponent_count` opponents.
    ///
    /// Seat 0 is the hero. Opponent seats take `opponents` in order; seats
    /// that are `None` or beyond the supplied list are dealt every trial.
    pub fn run_multiplayer(
        &self,
        hero: &HoleCards,
        opponents: &[Option<HoleCards>],
        board: &[Card],
        opponent_count: usize,
    ) -> Result<MultiwayResult> {
        self.run_multiplayer_with_progress(hero, opponents, board, opponent_count, |_| {})
    }

    /// Like [`Simulator::run_multiplayer`], calling `progress` with each
    /// finished batch's trial count.
    pub fn run_multiplayer_with_progress<F>(
        &self,
        hero: &HoleCards,
        opponents: &[Option<HoleCards>],
        board: &[Card],
        opponent_count: usize,
        progress: F,
    ) -> Result<MultiwayResult>
    where
        F: Fn(u64) + Sync,
    {
        self.config.validate()?;
        check_board(board)?;
        if !(1..=MAX_OPPONENTS).contains(&opponent_count) {
            return Err(SimError::InvalidOpponentCount(opponent_count));
        }
        if opponents.len() > opponent_count {
            return Err(SimError::TooManyOpponentHands {
                given: opponents.len(),
                seats: opponent_count,
            });
        }

        let mut seats = Vec::with_capacity(opponent_count + 1);
        seats.push(Some(*hero));
        seats.extend_from_slice(opponents);
        seats.resize(opponent_count + 1, None);

        let mut known: Vec<Card> = seats.iter().flatten().flat_map(|h| h.cards()).collect();
        known.extend_from_slice(board);
        ensure_distinct(&known)?;
        let template = Deck::without(&known)?;
        log::debug!(
            "multiplayer run: {} seats ({} dealt each trial), board {:?}",
            seats.len(),
            seats.iter().filter(|s| s.is_none()).count(),
            board
        );

        let start = Instant::now();
        let tally = self.run_batches(
            || WinTally::new(seats.len()),
            |rng: &mut StdRng, tally: &mut WinTally| {
                let mut deck = template.clone();
                let mut holes = Vec::with_capacity(seats.len());
                for seat in &seats {
                    let hole = match seat {
                        Some(hole) => *hole,
                        None => deal_hole(&mut deck, rng)?,
                    };
                    holes.push(hole);
                }
                let community = complete_board(board, &mut deck, rng)?;
                let hands = holes
                    .iter()
                    .map(|hole| evaluate(&hole.cards(), &community))
                    .collect::<Result<Vec<Hand>>>()?;
                tally.record(score(&hands));
                Ok(())
            },
            &progress,
        )?;

        log::info!(
            "multiplayer run finished: {} trials, {} chops in {:.2}s",
            tally.trials(),
            tally.chops(),
            start.elapsed().as_secs_f64()
        );
        Ok(MultiwayResult::from_tally(&seats, tally))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn batch_rng(&self, index: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index)),
            None => StdRng::from_entropy(),
        }
    }

    /// Run all batches in parallel and merge their tallies.
    fn run_batches<T, N, F, P>(&self, empty: N, trial: F, progress: &P) -> Result<T>
    where
        T: Tally,
        N: Fn() -> T + Sync + Send,
        F: Fn(&mut StdRng, &mut T) -> Result<()> + Sync,
        P: Fn(u64) + Sync,
    {
        let trials = self.config.trials;
        let batch_size = self.config.batch_size;
        let batches = trials.div_ceil(batch_size);
        log::debug!(
            "{} trials in {} batches of {} ({} threads)",
            trials,
            batches,
            batch_size,
            self.config
                .num_threads
                .unwrap_or_else(rayon::current_num_threads)
        );

        let work = || {
            (0..batches)
                .into_par_iter()
                .map(|index| -> Result<T> {
                    let len = batch_size.min(trials - index * batch_size);
                    let mut rng = self.batch_rng(index);
                    let mut tally = empty();
                    for _ in 0..len {
                        if self.is_cancelled() {
                            break;
                        }
                        trial(&mut rng, &mut tally)?;
                    }
                    progress(tally.trials());
                    Ok(tally)
                })
                .try_reduce(&empty, |a, b| Ok(a.merge(b)))
        };

        let tally = match self.config.num_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(work)?,
            None => work()?,
        };

        if tally.trials() < trials {
            log::warn!(
                "run cancelled after {} of {} trials",
                tally.trials(),
                trials
            );
        }
        Ok(tally)
    }
}

fn check_board(board: &[Card]) -> Result<()> {
    if board.len() > BOARD_SIZE {
        return Err(SimError::TooManyBoardCards(board.len()));
    }
    Ok(())
}

/// Known board plus random draws up to five cards.
fn complete_board<R: Rng + ?Sized>(
    board: &[Card],
    deck: &mut Deck,
    rng: &mut R,
) -> Result<Vec<Card>> {
    let mut community = Vec::with_capacity(BOARD_SIZE);
    community.extend_from_slice(board);
    while community.len() < BOARD_SIZE {
        community.push(deck.deal(rng)?);
    }
    Ok(community)
}

fn deal_hole<R: Rng + ?Sized>(deck: &mut Deck, rng: &mut R) -> Result<HoleCards> {
    let first = deck.deal(rng)?;
    let second = deck.deal(rng)?;
    HoleCards::new(first, second)
}

fn evaluate(hole: &[Card], community: &[Card]) -> Result<Hand> {
    classify(hole, community).ok_or(SimError::IncompleteHand(hole.len() + community.len()))
}

/// Classify one hand given as string identities.
///
/// Unlike [`classify`], the cards are validated first: an unknown identity,
/// a repeated card, a hole that is not two cards or a board longer than five
/// cards is an error. Fewer than five cards in total is `Ok(None)`.
pub fn classify_ids(hole: &[&str], board: &[&str]) -> Result<Option<Hand>> {
    let hole = HoleCards::from_ids(hole)?;
    let board = parse_cards(board)?;
    check_board(&board)?;
    let hole_cards = hole.cards();
    ensure_distinct(hole_cards.iter().chain(&board))?;
    Ok(classify(&hole_cards, &board))
}

/// Single-player run over string identities.
///
/// Returns `(trials, counts)` with counts ordered high card .. straight flush.
pub fn run_single(hole: &[&str], board: &[&str], trials: u64) -> Result<(u64, [u64; 9])> {
    let hole = HoleCards::from_ids(hole)?;
    let board = parse_cards(board)?;
    let config = SimConfig::single_default().with_trials(trials);
    Ok(Simulator::new(config).run_single(&hole, &board)?.into_parts())
}

/// Multiplayer run over string identities.
///
/// Each entry of `opponents` is either two identities or empty for a seat
/// dealt every trial.
pub fn run_multiplayer(
    hero: &[&str],
    opponents: &[&[&str]],
    board: &[&str],
    opponent_count: usize,
    trials: u64,
) -> Result<MultiwayResult> {
    let hero = HoleCards::from_ids(hero)?;
    let opponents = opponents
        .iter()
        .map(|ids| parse_seat(*ids))
        .collect::<Result<Vec<_>>>()?;
    let board = parse_cards(board)?;
    let config = SimConfig::multiplayer_default().with_trials(trials);
    Simulator::new(config).run_multiplayer(&hero, &opponents, &board, opponent_count)
}
