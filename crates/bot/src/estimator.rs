// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo win probability estimator.
//!
//! The estimator samples random opponent hands from the cards that have not
//! been seen and counts how many times the local hand wins. Before the flop
//! hands are compared with a cheap pairs and high cards rule, after the flop
//! both hands are ranked with [HandRank]. The probability of beating a single
//! opponent is raised to the number of opponents, assuming that opponents
//! hands are independent.
use log::debug;
use rand::prelude::*;
use std::{
    cmp::Ordering,
    thread,
    time::{Duration, Instant},
};
use thiserror::Error;

use phoenix_core::{
    game_state::GameState,
    poker::{Card, Deck, HandRank, Street},
};

/// Attempts to draw a card different from the first drawn card.
const MAX_DRAW_ATTEMPTS: usize = 64;

/// Number of trials between deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 32;

/// Estimator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Number of sampled opponent hands for each estimate.
    pub sample_count: usize,
    /// Number of threads that share the samples.
    pub workers: usize,
    /// Stops sampling after this time if set.
    pub timeout: Option<Duration>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            workers: 1,
            timeout: None,
        }
    }
}

/// Win estimate errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// The local player doesn't have two hole cards.
    #[error("expected 2 hole cards, got {0}")]
    MissingHoleCards(usize),
    /// Two distinct cards could not be drawn.
    #[error("cannot draw two distinct cards from {available} available cards")]
    DrawFailed {
        /// Number of cards available for drawing.
        available: usize,
    },
    /// The estimate is not a probability.
    #[error("win estimate {0} is out of range")]
    OutOfRange(f64),
}

/// Estimates the probability of winning the current hand.
#[derive(Debug)]
pub struct WinEstimator {
    config: EstimatorConfig,
    rng: StdRng,
    stale: bool,
    estimate: f64,
}

impl WinEstimator {
    /// Creates an estimator with a random generator seeded by the OS.
    pub fn new(config: EstimatorConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates an estimator with the given random generator.
    pub fn with_rng(config: EstimatorConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            stale: true,
            estimate: 0.0,
        }
    }

    /// Invalidates the last estimate, called when a card is dealt.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Checks if the next estimate must sample again.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The last computed estimate.
    pub fn last_estimate(&self) -> f64 {
        self.estimate
    }

    /// Clears the last estimate at the start of a hand.
    pub fn reset(&mut self) {
        self.stale = true;
        self.estimate = 0.0;
    }

    /// Returns the probability of winning the hand against the players still
    /// in play.
    ///
    /// The last estimate is returned without sampling if no card has been
    /// dealt since it was computed.
    pub fn estimate(&mut self, state: &GameState) -> Result<f64, EstimateError> {
        if !self.stale {
            return Ok(self.estimate);
        }

        let own_cards = state.own_cards();
        let [h1, h2] = match own_cards {
            [h1, h2, ..] => [*h1, *h2],
            _ => return Err(EstimateError::MissingHoleCards(own_cards.len())),
        };

        let community = &state.community_cards()[..state.community_cards().len().min(5)];

        let mut deck = Deck::default();
        for &card in [h1, h2].iter().chain(community) {
            deck.remove(card);
        }

        let available = deck.cards();
        if available.len() < 2 {
            return Err(EstimateError::DrawFailed {
                available: available.len(),
            });
        }

        let mut hand = vec![h1, h2];
        hand.extend_from_slice(community);

        // Hands are ranked only when there are enough community cards.
        let my_rank = if state.street() != Street::PreFlop && community.len() >= 3 {
            Some(HandRank::eval(&hand))
        } else {
            None
        };

        let sampler = Sampler {
            available,
            hole: [h1, h2],
            hand: &hand,
            community,
            my_rank,
            deadline: self.config.timeout.map(|t| Instant::now() + t),
        };

        let tally = self.sample(&sampler)?;
        let single = tally.wins as f64 / tally.trials.max(1) as f64;

        let opponents = state.players_in_play().len().saturating_sub(1);
        let estimate = single.powi(i32::try_from(opponents).unwrap_or(i32::MAX));

        debug!(
            "Win estimate {estimate:.3} single {single:.3} opponents {opponents} trials {}",
            tally.trials
        );

        if !(0.0..=1.0).contains(&estimate) {
            return Err(EstimateError::OutOfRange(estimate));
        }

        self.estimate = estimate;
        self.stale = false;

        Ok(estimate)
    }

    fn sample(&mut self, sampler: &Sampler<'_>) -> Result<Tally, EstimateError> {
        let trials = self.config.sample_count.max(1);
        let workers = self.config.workers.clamp(1, trials);

        if workers == 1 {
            return sampler.run(&mut self.rng, trials);
        }

        let rngs = (0..workers)
            .map(|_| StdRng::from_rng(&mut self.rng))
            .collect::<Vec<_>>();

        let per_worker = trials / workers;
        let extra = trials % workers;

        thread::scope(|s| {
            let handles = rngs
                .into_iter()
                .enumerate()
                .map(|(idx, mut rng)| {
                    let count = per_worker + usize::from(idx < extra);
                    s.spawn(move || sampler.run(&mut rng, count))
                })
                .collect::<Vec<_>>();

            handles.into_iter().try_fold(Tally::default(), |acc, h| {
                let tally = h
                    .join()
                    .unwrap_or_else(|e| std::panic::resume_unwind(e))?;
                Ok::<_, EstimateError>(Tally {
                    wins: acc.wins + tally.wins,
                    trials: acc.trials + tally.trials,
                })
            })
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    wins: usize,
    trials: usize,
}

/// Inputs shared by the sampling workers.
struct Sampler<'a> {
    available: &'a [Card],
    hole: [Card; 2],
    hand: &'a [Card],
    community: &'a [Card],
    my_rank: Option<HandRank>,
    deadline: Option<Instant>,
}

impl Sampler<'_> {
    fn run(&self, rng: &mut StdRng, count: usize) -> Result<Tally, EstimateError> {
        let mut tally = Tally::default();
        let mut other = Vec::with_capacity(7);

        for n in 0..count {
            if n > 0
                && n % DEADLINE_CHECK_INTERVAL == 0
                && self.deadline.is_some_and(|d| Instant::now() >= d)
            {
                break;
            }

            let (o1, o2) = draw_pair(rng, self.available)?;

            let win = match self.my_rank {
                None => beats_pre_flop(self.hole, [o1, o2]),
                Some(my_rank) => {
                    other.clear();
                    other.extend([o1, o2]);
                    other.extend_from_slice(self.community);

                    let other_rank = HandRank::eval(&other);
                    HandRank::compare(my_rank, self.hand, other_rank, &other) == Ordering::Greater
                }
            };

            tally.trials += 1;
            if win {
                tally.wins += 1;
            }
        }

        Ok(tally)
    }
}

/// Draws two distinct cards.
fn draw_pair<R: Rng>(rng: &mut R, cards: &[Card]) -> Result<(Card, Card), EstimateError> {
    let failed = EstimateError::DrawFailed {
        available: cards.len(),
    };

    let first = *cards.choose(rng).ok_or_else(|| failed.clone())?;
    for _ in 0..MAX_DRAW_ATTEMPTS {
        let second = *cards.choose(rng).ok_or_else(|| failed.clone())?;
        if second != first {
            return Ok((first, second));
        }
    }

    Err(failed)
}

/// Compares two pre-flop hands, returns true if `mine` is strictly better.
///
/// A pair beats no pair, two pairs are compared by rank, and hands without
/// pairs are compared by their highest and then by their lowest card.
fn beats_pre_flop(mine: [Card; 2], other: [Card; 2]) -> bool {
    let is_pair = |h: [Card; 2]| h[0].rank() == h[1].rank();
    let high_low = |h: [Card; 2]| {
        let (a, b) = (h[0].rank(), h[1].rank());
        (a.max(b), a.min(b))
    };

    match (is_pair(mine), is_pair(other)) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => mine[0].rank() > other[0].rank(),
        (false, false) => high_low(mine) > high_low(other),
    }
}
