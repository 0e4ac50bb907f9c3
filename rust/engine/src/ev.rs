//! Expected value helpers built on top of computed equities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::equity::EquityResult;
use crate::multiway::MultiwayResult;

/// `pot * equity% - investment`, in the same unit as `pot`.
///
/// ```
/// use pokerlab_engine::ev::expected_value;
///
/// assert_eq!(expected_value(50.0, 100.0, 50.0), 0.0);
/// assert_eq!(expected_value(75.0, 100.0, 25.0), 50.0);
/// ```
pub fn expected_value(equity: f64, pot: f64, investment: f64) -> f64 {
    pot * (equity / 100.0) - investment
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadsUpEv {
    pub hero: f64,
    pub villain: f64,
}

impl HeadsUpEv {
    /// Both players are assumed to have put `investment` into `pot`.
    pub fn from_result(result: &EquityResult, pot: f64, investment: f64) -> Self {
        Self {
            hero: expected_value(result.hero_equity, pot, investment),
            villain: expected_value(result.villain_equity, pot, investment),
        }
    }
}

/// Share of `pot` each player wins on average. No investment is deducted.
pub fn multiway_expected_values(result: &MultiwayResult, pot: f64) -> BTreeMap<String, f64> {
    result
        .players
        .iter()
        .map(|(name, p)| (name.clone(), p.equity * pot / 100.0))
        .collect()
}
