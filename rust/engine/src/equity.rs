//! Heads-up Monte Carlo equity: a fixed hero hand against a villain range.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cards::{find_duplicate, Card, CardMask};
use crate::combos::{combo_mask, expand_range, filter_conflicts, Combo};
use crate::deck::complete_board;
use crate::errors::{EquityError, EquityFailure};
use crate::hand::evaluate_seven;
use crate::range::try_parse_range;
use crate::sampling::{round1, run_sharded, SimConfig, Stopper, Tally};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    pub hero_equity: f64,
    pub villain_equity: f64,
    pub hero_wins: u32,
    pub villain_wins: u32,
    pub ties: u32,
    /// Iterations that produced a showdown; may be below the requested count.
    pub total_iterations: u32,
    pub calculation_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EquityFailure>,
}

impl EquityResult {
    fn failed(e: &EquityError, started: Instant) -> Self {
        Self {
            calculation_time_ms: elapsed_ms(started),
            error: Some(e.into()),
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn iterations_per_second(&self) -> f64 {
        if self.calculation_time_ms <= 0.0 {
            return 0.0;
        }
        self.total_iterations as f64 / (self.calculation_time_ms / 1000.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HeadsUpTally {
    hero_wins: u32,
    villain_wins: u32,
    ties: u32,
    discarded: u32,
}

impl HeadsUpTally {
    fn valid(&self) -> u32 {
        self.hero_wins + self.villain_wins + self.ties
    }
}

impl Tally for HeadsUpTally {
    fn merge(self, o: Self) -> Self {
        Self {
            hero_wins: self.hero_wins + o.hero_wins,
            villain_wins: self.villain_wins + o.villain_wins,
            ties: self.ties + o.ties,
            discarded: self.discarded + o.discarded,
        }
    }
}

/// Boundary entry point: never panics and never returns `Err`; failures land
/// in [`EquityResult::error`].
pub fn calculate_equity(
    hero: &[Card],
    villain_range: &str,
    board: &[Card],
    config: &SimConfig,
) -> EquityResult {
    let started = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        try_calculate_equity(hero, villain_range, board, config)
    }))
    .unwrap_or_else(|_| Err(EquityError::Computation("Internal error during calculation".into())));
    match outcome {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "equity calculation failed");
            EquityResult::failed(&e, started)
        }
    }
}

pub fn try_calculate_equity(
    hero: &[Card],
    villain_range: &str,
    board: &[Card],
    config: &SimConfig,
) -> Result<EquityResult, EquityError> {
    let started = Instant::now();
    let hero = validate_known_cards(hero, board)?;
    config.validate()?;

    if villain_range.trim().is_empty() {
        return Err(EquityError::Validation("Villain range is required".into()));
    }
    let parsed = try_parse_range(villain_range)?;
    let dead = CardMask::of(&hero).union(CardMask::of(board));
    let live = filter_conflicts(&expand_range(&parsed.hands), dead);
    if live.is_empty() {
        return Err(EquityError::Computation(
            "All villain combinations conflict with known cards".into(),
        ));
    }

    let tally = run_sharded(config, |rng, n, stop| {
        simulate_shard(rng, n, stop, &hero, &live, board, dead)
    })?;
    if tally.discarded > 0 {
        warn!(discarded = tally.discarded, "iterations discarded");
    }

    let valid = tally.valid();
    if valid == 0 {
        return Err(EquityError::Computation("No valid simulation was possible".into()));
    }

    let ties_half = tally.ties as f64 * 0.5;
    let result = EquityResult {
        hero_equity: round1((tally.hero_wins as f64 + ties_half) / valid as f64 * 100.0),
        villain_equity: round1((tally.villain_wins as f64 + ties_half) / valid as f64 * 100.0),
        hero_wins: tally.hero_wins,
        villain_wins: tally.villain_wins,
        ties: tally.ties,
        total_iterations: valid,
        calculation_time_ms: elapsed_ms(started),
        error: None,
    };
    info!(
        hero_equity = result.hero_equity,
        iterations = valid,
        combos = live.len(),
        elapsed_ms = result.calculation_time_ms,
        "heads-up equity computed"
    );
    Ok(result)
}

fn simulate_shard(
    rng: &mut dyn RngCore,
    iterations: u32,
    stop: &Stopper,
    hero: &[Card; 2],
    live: &[Combo],
    board: &[Card],
    dead: CardMask,
) -> Result<HeadsUpTally, EquityError> {
    let mut tally = HeadsUpTally::default();
    for i in 0..iterations {
        stop.check(i)?;
        let villain = live[rng.random_range(0..live.len())];
        let villain_mask = combo_mask(&villain);
        if villain_mask.intersects(dead) {
            tally.discarded += 1;
            continue;
        }
        let Ok(b) = complete_board(board, dead.union(villain_mask), rng) else {
            tally.discarded += 1;
            continue;
        };
        let h = evaluate_seven(&[hero[0], hero[1], b[0], b[1], b[2], b[3], b[4]]);
        let v = evaluate_seven(&[villain[0], villain[1], b[0], b[1], b[2], b[3], b[4]]);
        match h.value.cmp(&v.value) {
            std::cmp::Ordering::Greater => tally.hero_wins += 1,
            std::cmp::Ordering::Less => tally.villain_wins += 1,
            std::cmp::Ordering::Equal => tally.ties += 1,
        }
    }
    Ok(tally)
}

/// Checks hero size, board size and that no card repeats across them.
pub(crate) fn validate_known_cards(hero: &[Card], board: &[Card]) -> Result<[Card; 2], EquityError> {
    let [h0, h1] = hero else {
        return Err(EquityError::Validation(
            "Hero must have exactly 2 cards".into(),
        ));
    };
    if board.len() > 5 {
        return Err(EquityError::Validation(
            "Board cannot have more than 5 cards".into(),
        ));
    }
    let mut all = vec![*h0, *h1];
    all.extend_from_slice(board);
    if let Some(dup) = find_duplicate(&all) {
        return Err(EquityError::Validation(format!("Duplicate card detected: {}", dup)));
    }
    Ok([*h0, *h1])
}

pub(crate) fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
