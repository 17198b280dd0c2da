//! Noisy channel simulator with per-bit error injection.
//!
//! Simulates a binary symmetric channel: every bit is flipped
//! independently with probability equal to the target bit-error rate
//! (BER). All randomness comes from a seeded ChaCha8 RNG, so given the
//! same seed, inputs, and call order, outputs are bit-identical —
//! including the order of recorded flip positions.
//!
//! # Determinism
//!
//! One simulator instance owns one RNG stream that advances on every
//! call (one draw per input bit, regardless of rate). The instance is
//! not safe to share across threads without external synchronization;
//! separate instances (with separate seeds or not) are fully independent
//! and may run in parallel.
//!
//! # Statistics
//!
//! [`ChannelSimulator::run_trials`] repeats an injection and aggregates
//! the per-trial flip counts into an immutable [`ChannelStats`]: mean
//! achieved BER, population variance and standard deviation, min/max
//! flip counts, and a flip-count histogram.

use crate::error::{ChannelError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// Result of one noise-injection pass over a bit sequence.
///
/// Invariant: `noisy_bits[i] == original_bits[i]` for every `i` not in
/// `flipped_positions`, and the complement bit at every `i` that is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInjection {
    /// The input bits, untouched
    pub original_bits: Vec<u8>,

    /// The input bits after noise, same length
    pub noisy_bits: Vec<u8>,

    /// Indices of flipped bits, in ascending order
    pub flipped_positions: Vec<usize>,

    /// Total number of bits processed
    pub total_bits: usize,
}

impl ErrorInjection {
    /// Number of bits the channel flipped.
    pub fn flip_count(&self) -> usize {
        self.flipped_positions.len()
    }

    /// Achieved bit-error rate (flips / total).
    ///
    /// Returns 0.0 for empty input.
    pub fn achieved_ber(&self) -> f64 {
        if self.total_bits == 0 {
            0.0
        } else {
            self.flip_count() as f64 / self.total_bits as f64
        }
    }
}

/// Aggregate statistics over a batch of independent injection trials.
///
/// Computed once by [`ChannelSimulator::run_trials`] and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStats {
    /// The BER the channel was asked to produce
    pub target_ber: f64,

    /// Number of trials run
    pub trials: usize,

    /// Total bits processed across all trials
    pub total_bits: usize,

    /// Total bits flipped across all trials
    pub total_flips: usize,

    /// Mean achieved BER across trials
    pub mean_ber: f64,

    /// Population variance of the per-trial achieved BER
    pub ber_variance: f64,

    /// Population standard deviation of the per-trial achieved BER
    pub ber_std_dev: f64,

    /// Mean flip count per trial
    pub mean_flips_per_trial: f64,

    /// Smallest flip count observed in a single trial
    pub min_flips: usize,

    /// Largest flip count observed in a single trial
    pub max_flips: usize,

    /// Flip count -> number of trials that produced it
    pub histogram: BTreeMap<usize, usize>,
}

/// Channel simulator injecting independent per-bit errors.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread or synchronize externally.
pub struct ChannelSimulator {
    rng: ChaCha8Rng,
    seed: u64,
}

impl ChannelSimulator {
    /// Create a simulator with a time-derived seed (non-reproducible).
    ///
    /// Test code should use [`ChannelSimulator::with_seed`] instead.
    pub fn new() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|t| t.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// Create a simulator with an explicit seed (reproducible).
    ///
    /// Two instances built with the same seed and fed the same inputs in
    /// the same order produce bit-identical outputs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this simulator was built with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Inject independent bit errors at the target rate.
    ///
    /// For every bit, draws a uniform [0, 1) value and flips the bit when
    /// the draw is below `ber`, recording the index. A rate of 0.0
    /// produces zero flips for any input — a hard guarantee, since no
    /// [0, 1) draw is ever below zero.
    ///
    /// # Side Effects
    /// Advances the RNG stream by one draw per input bit, at any rate.
    ///
    /// # Errors
    /// - `ChannelError::InvalidRate` if `ber` is outside [0.0, 1.0]
    /// - `ChannelError::InvalidBit` if any input element is not 0 or 1
    pub fn inject_errors(&mut self, bits: &[u8], ber: f64) -> Result<ErrorInjection> {
        if !(0.0..=1.0).contains(&ber) {
            return Err(ChannelError::InvalidRate(ber).into());
        }
        for (position, &value) in bits.iter().enumerate() {
            if value > 1 {
                return Err(ChannelError::InvalidBit { position, value }.into());
            }
        }

        let mut noisy_bits = bits.to_vec();
        let mut flipped_positions = Vec::new();

        for (i, bit) in noisy_bits.iter_mut().enumerate() {
            let roll: f64 = self.rng.gen();
            if roll < ber {
                *bit ^= 1;
                flipped_positions.push(i);
            }
        }

        Ok(ErrorInjection {
            original_bits: bits.to_vec(),
            noisy_bits,
            flipped_positions,
            total_bits: bits.len(),
        })
    }

    /// Run repeated independent injections and aggregate their statistics.
    ///
    /// Trials run sequentially on this instance, so the RNG stream
    /// advances across them: trial k sees a different draw sequence than
    /// trial k-1, but the whole batch is reproducible from the seed.
    ///
    /// Variance is the population variance of the per-trial achieved BER,
    /// computed with a two-pass sum of squared deviations.
    ///
    /// # Errors
    /// - `ChannelError::InvalidTrialCount` if `trials` is zero
    /// - Any error `inject_errors` reports for `(bits, ber)`
    pub fn run_trials(&mut self, bits: &[u8], ber: f64, trials: usize) -> Result<ChannelStats> {
        if trials == 0 {
            return Err(ChannelError::InvalidTrialCount(trials).into());
        }

        let mut flip_counts = Vec::with_capacity(trials);
        let mut achieved_bers = Vec::with_capacity(trials);
        let mut histogram = BTreeMap::new();

        for _ in 0..trials {
            let result = self.inject_errors(bits, ber)?;
            *histogram.entry(result.flip_count()).or_insert(0) += 1;
            achieved_bers.push(result.achieved_ber());
            flip_counts.push(result.flip_count());
        }

        let total_flips: usize = flip_counts.iter().sum();
        let min_flips = flip_counts.iter().copied().min().unwrap_or(0);
        let max_flips = flip_counts.iter().copied().max().unwrap_or(0);

        let mean_ber = achieved_bers.iter().sum::<f64>() / trials as f64;
        let ber_variance = achieved_bers
            .iter()
            .map(|b| {
                let diff = b - mean_ber;
                diff * diff
            })
            .sum::<f64>()
            / trials as f64;

        Ok(ChannelStats {
            target_ber: ber,
            trials,
            total_bits: bits.len() * trials,
            total_flips,
            mean_ber,
            ber_variance,
            ber_std_dev: ber_variance.sqrt(),
            mean_flips_per_trial: total_flips as f64 / trials as f64,
            min_flips,
            max_flips,
            histogram,
        })
    }
}

impl Default for ChannelSimulator {
    fn default() -> Self {
        Self::new()
    }
}
