//! Run configuration and the shared Monte Carlo driver.
//!
//! The iteration budget is split into shards. Each shard owns its RNG and a
//! local tally; tallies are merged by addition once every shard finishes.
//! With `threads == 1` the single shard runs on the calling thread.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::EquityError;

pub const DEFAULT_ITERATIONS: u32 = 10_000;
pub const MIN_ITERATIONS: u32 = 100;
pub const MAX_ITERATIONS: u32 = 100_000;
pub const MAX_THREADS: usize = 64;

/// How often (in iterations) a shard polls for cancellation.
const CANCEL_POLL: u32 = 256;

/// How co-winners share a multiway pot in the reported equity.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// `(wins + ties * 0.5 / max(1, ties)) / valid`, matching earlier output.
    #[default]
    Legacy,
    /// Each co-winner is credited `1 / winners` for the iteration.
    Split,
}

impl FromStr for TiePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(TiePolicy::Legacy),
            "split" | "split-pot" | "splitpot" => Ok(TiePolicy::Split),
            other => Err(format!("Unknown tie policy: {} (expected legacy or split)", other)),
        }
    }
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiePolicy::Legacy => f.write_str("legacy"),
            TiePolicy::Split => f.write_str("split"),
        }
    }
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub iterations: u32,
    /// `Some` switches to a reproducible ChaCha8 stream per shard.
    pub seed: Option<u64>,
    pub threads: usize,
    pub tie_policy: TiePolicy,
    pub cancel: Option<CancelToken>,
    pub deadline: Option<Instant>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            threads: 1,
            tie_policy: TiePolicy::Legacy,
            cancel: None,
            deadline: None,
        }
    }
}

impl SimConfig {
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> Result<(), EquityError> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(EquityError::Validation(format!(
                "Iterations must be between {} and {}",
                MIN_ITERATIONS, MAX_ITERATIONS
            )));
        }
        if self.threads == 0 || self.threads > MAX_THREADS {
            return Err(EquityError::Validation(format!(
                "Threads must be between 1 and {}",
                MAX_THREADS
            )));
        }
        Ok(())
    }
}

/// Polled inside sampling loops.
#[derive(Debug, Clone)]
pub(crate) struct Stopper {
    cancel: Option<CancelToken>,
    deadline: Option<Instant>,
}

impl Stopper {
    fn from_config(cfg: &SimConfig) -> Self {
        Self {
            cancel: cfg.cancel.clone(),
            deadline: cfg.deadline,
        }
    }

    /// Cheap enough to call every iteration; only consults the flag and
    /// clock every `CANCEL_POLL` iterations.
    pub(crate) fn check(&self, iteration: u32) -> Result<(), EquityError> {
        if iteration % CANCEL_POLL != 0 {
            return Ok(());
        }
        let cancelled = self.cancel.as_ref().is_some_and(CancelToken::is_cancelled);
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if cancelled || expired {
            return Err(EquityError::Cancelled);
        }
        Ok(())
    }
}

/// Per-shard counters merged by addition.
pub(crate) trait Tally: Default + Send {
    fn merge(self, other: Self) -> Self;
}

pub(crate) fn make_rng(seed: Option<u64>) -> Box<dyn RngCore + Send> {
    match seed {
        Some(s) => Box::new(ChaCha8Rng::seed_from_u64(s)),
        None => Box::new(SmallRng::seed_from_u64(rand::random())),
    }
}

/// Splits `iterations` into `threads` near-equal shards.
pub(crate) fn shard_sizes(iterations: u32, threads: usize) -> Vec<u32> {
    let shards = threads.clamp(1, iterations.max(1) as usize) as u32;
    let base = iterations / shards;
    let extra = iterations % shards;
    (0..shards).map(|i| base + u32::from(i < extra)).collect()
}

/// Runs `job(rng, shard_iterations, stopper)` on every shard and merges the
/// tallies. Any shard error (including cancellation) fails the whole run and
/// discards every partial tally.
pub(crate) fn run_sharded<T, F>(cfg: &SimConfig, job: F) -> Result<T, EquityError>
where
    T: Tally,
    F: Fn(&mut dyn RngCore, u32, &Stopper) -> Result<T, EquityError> + Sync,
{
    let stopper = Stopper::from_config(cfg);
    let sizes = shard_sizes(cfg.iterations, cfg.threads);
    debug!(shards = sizes.len(), iterations = cfg.iterations, seeded = cfg.seed.is_some(), "shard plan");

    let run_shard = |(i, n): (usize, u32)| {
        let mut rng = make_rng(cfg.seed.map(|s| s.wrapping_add(i as u64)));
        job(rng.as_mut(), n, &stopper)
    };

    if sizes.len() == 1 {
        return run_shard((0, sizes[0]));
    }
    sizes
        .into_par_iter()
        .enumerate()
        .map(run_shard)
        .try_reduce(T::default, |a, b| Ok(a.merge(b)))
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
