//! Multiway Monte Carlo equity: hero against one to eight named ranges.
//!
//! Opponent hands are dealt in seat order within each iteration, each one
//! conditioned on the cards already committed. If some opponent has no
//! compatible combo left the whole iteration is discarded.

use std::collections::{BTreeMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{Card, CardMask};
use crate::combos::{combo_mask, expand_range, filter_conflicts, Combo};
use crate::deck::complete_board;
use crate::equity::{elapsed_ms, validate_known_cards};
use crate::errors::{EquityError, EquityFailure};
use crate::hand::evaluate_seven;
use crate::range::try_parse_range;
use crate::sampling::{round1, run_sharded, SimConfig, Stopper, Tally, TiePolicy};

pub const MAX_OPPONENTS: usize = 8;
pub const HERO: &str = "hero";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub range: String,
}

impl Opponent {
    pub fn new(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerEquity {
    pub equity: f64,
    /// Iterations won outright.
    pub wins: u32,
    /// Iterations where the pot was split with at least one other player.
    pub ties: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiwayResult {
    /// Keyed by player name; the hero is stored under [`HERO`].
    pub players: BTreeMap<String, PlayerEquity>,
    pub total_iterations: u32,
    pub calculation_time_ms: f64,
    pub tie_policy: TiePolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EquityFailure>,
}

impl MultiwayResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn player(&self, name: &str) -> Option<&PlayerEquity> {
        self.players.get(name)
    }

    pub fn iterations_per_second(&self) -> f64 {
        if self.calculation_time_ms <= 0.0 {
            return 0.0;
        }
        self.total_iterations as f64 / (self.calculation_time_ms / 1000.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SeatTally {
    wins: u32,
    ties: u32,
    // sum of 1/winners over split pots
    split_share: f64,
}

#[derive(Debug, Clone, Default)]
struct MultiwayTally {
    seats: Vec<SeatTally>,
    valid: u32,
    discarded: u32,
}

impl Tally for MultiwayTally {
    fn merge(mut self, o: Self) -> Self {
        if self.seats.is_empty() {
            return o;
        }
        for (a, b) in self.seats.iter_mut().zip(&o.seats) {
            a.wins += b.wins;
            a.ties += b.ties;
            a.split_share += b.split_share;
        }
        self.valid += o.valid;
        self.discarded += o.discarded;
        self
    }
}

pub fn calculate_multiway_equity(
    hero: &[Card],
    opponents: &[Opponent],
    board: &[Card],
    config: &SimConfig,
) -> MultiwayResult {
    let started = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        try_calculate_multiway_equity(hero, opponents, board, config)
    }))
    .unwrap_or_else(|_| Err(EquityError::Computation("Internal error during calculation".into())));
    match outcome {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "multiway calculation failed");
            MultiwayResult {
                calculation_time_ms: elapsed_ms(started),
                tie_policy: config.tie_policy,
                error: Some((&e).into()),
                ..MultiwayResult::default()
            }
        }
    }
}

pub fn try_calculate_multiway_equity(
    hero: &[Card],
    opponents: &[Opponent],
    board: &[Card],
    config: &SimConfig,
) -> Result<MultiwayResult, EquityError> {
    let started = Instant::now();
    let hero = validate_known_cards(hero, board)?;
    validate_opponents(opponents)?;
    config.validate()?;

    let dead = CardMask::of(&hero).union(CardMask::of(board));
    let mut ranges: Vec<Vec<Combo>> = Vec::with_capacity(opponents.len());
    for opp in opponents {
        let parsed = try_parse_range(&opp.range).map_err(|e| {
            EquityError::Validation(format!("Range error for {}: {}", opp.name, e))
        })?;
        let live = filter_conflicts(&expand_range(&parsed.hands), dead);
        if live.is_empty() {
            return Err(EquityError::Computation(format!(
                "Range of {} has no combinations compatible with known cards",
                opp.name
            )));
        }
        debug!(opponent = %opp.name, combos = live.len(), "opponent range ready");
        ranges.push(live);
    }

    let tally = run_sharded(config, |rng, n, stop| {
        simulate_shard(rng, n, stop, &hero, &ranges, board, dead)
    })?;
    if tally.discarded > 0 {
        warn!(discarded = tally.discarded, "multiway iterations discarded");
    }
    if tally.valid == 0 {
        return Err(EquityError::Computation("No valid simulation was possible".into()));
    }

    let valid = tally.valid as f64;
    let names = std::iter::once(HERO).chain(opponents.iter().map(|o| o.name.as_str()));
    let players = names
        .zip(&tally.seats)
        .map(|(name, seat)| {
            let credit = match config.tie_policy {
                TiePolicy::Legacy => seat.ties as f64 * 0.5 / f64::max(1.0, seat.ties as f64),
                TiePolicy::Split => seat.split_share,
            };
            let stats = PlayerEquity {
                equity: round1((seat.wins as f64 + credit) / valid * 100.0),
                wins: seat.wins,
                ties: seat.ties,
            };
            (name.to_string(), stats)
        })
        .collect();

    let result = MultiwayResult {
        players,
        total_iterations: tally.valid,
        calculation_time_ms: elapsed_ms(started),
        tie_policy: config.tie_policy,
        error: None,
    };
    info!(
        opponents = opponents.len(),
        iterations = tally.valid,
        elapsed_ms = result.calculation_time_ms,
        "multiway equity computed"
    );
    Ok(result)
}

fn validate_opponents(opponents: &[Opponent]) -> Result<(), EquityError> {
    if opponents.is_empty() {
        return Err(EquityError::Validation("At least one opponent is required".into()));
    }
    if opponents.len() > MAX_OPPONENTS {
        return Err(EquityError::Validation(format!(
            "At most {} opponents are supported",
            MAX_OPPONENTS
        )));
    }
    let mut names = HashSet::new();
    for opp in opponents {
        let name = opp.name.trim();
        if name.is_empty() {
            return Err(EquityError::Validation("Every opponent needs a name".into()));
        }
        if name.eq_ignore_ascii_case(HERO) {
            return Err(EquityError::Validation(format!(
                "Opponent name '{}' is reserved",
                name
            )));
        }
        if opp.range.trim().is_empty() {
            return Err(EquityError::Validation(format!(
                "Opponent {} needs a range",
                name
            )));
        }
        if !names.insert(name.to_lowercase()) {
            return Err(EquityError::Validation("Opponent names must be unique".into()));
        }
    }
    Ok(())
}

/// Uniform pick among combos not touching `used`, without allocating.
fn pick_available(rng: &mut dyn RngCore, combos: &[Combo], used: CardMask) -> Option<Combo> {
    let available = combos
        .iter()
        .filter(|c| !combo_mask(c).intersects(used))
        .count();
    if available == 0 {
        return None;
    }
    let k = rng.random_range(0..available);
    combos
        .iter()
        .filter(|c| !combo_mask(c).intersects(used))
        .nth(k)
        .copied()
}

fn simulate_shard(
    rng: &mut dyn RngCore,
    iterations: u32,
    stop: &Stopper,
    hero: &[Card; 2],
    ranges: &[Vec<Combo>],
    board: &[Card],
    dead: CardMask,
) -> Result<MultiwayTally, EquityError> {
    let seats = ranges.len() + 1;
    let mut tally = MultiwayTally {
        seats: vec![SeatTally::default(); seats],
        ..MultiwayTally::default()
    };
    let mut holes: Vec<Combo> = Vec::with_capacity(seats);
    let mut values: Vec<u32> = Vec::with_capacity(seats);

    'iter: for i in 0..iterations {
        stop.check(i)?;
        holes.clear();
        holes.push(*hero);
        let mut used = dead;
        for combos in ranges {
            let Some(combo) = pick_available(rng, combos, used) else {
                tally.discarded += 1;
                continue 'iter;
            };
            used = used.union(combo_mask(&combo));
            holes.push(combo);
        }

        let Ok(b) = complete_board(board, used, rng) else {
            tally.discarded += 1;
            continue;
        };

        values.clear();
        values.extend(
            holes
                .iter()
                .map(|h| evaluate_seven(&[h[0], h[1], b[0], b[1], b[2], b[3], b[4]]).value),
        );
        let best = values.iter().copied().max().unwrap_or(0);
        let winners = values.iter().filter(|&&v| v == best).count();

        tally.valid += 1;
        for (seat, &v) in tally.seats.iter_mut().zip(&values) {
            if v != best {
                continue;
            }
            if winners == 1 {
                seat.wins += 1;
            } else {
                seat.ties += 1;
                seat.split_share += 1.0 / winners as f64;
            }
        }
    }
    Ok(tally)
}
