//! Fixed-scenario throughput benchmark for the heads-up engine.
//!
//! Runs A♠K♠ against `QQ+, AKs, AKo` with no board and grades the observed
//! iterations per second.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cards::{Card, Rank, Suit};
use crate::equity::{calculate_equity, EquityResult};
use crate::sampling::SimConfig;

pub const BENCH_RANGE: &str = "QQ+, AKs, AKo";
pub const BENCH_ITERATIONS: u32 = 1_000;

const BENCH_HERO: [Card; 2] = [
    Card::new(Rank::Ace, Suit::Spades),
    Card::new(Rank::King, Suit::Spades),
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceGrade {
    Excellent,
    Good,
    NeedsOptimization,
}

impl PerformanceGrade {
    pub fn from_rate(iterations_per_second: f64) -> Self {
        if iterations_per_second > 1000.0 {
            PerformanceGrade::Excellent
        } else if iterations_per_second > 500.0 {
            PerformanceGrade::Good
        } else {
            PerformanceGrade::NeedsOptimization
        }
    }
}

impl fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PerformanceGrade::Excellent => "excellent",
            PerformanceGrade::Good => "good",
            PerformanceGrade::NeedsOptimization => "needs optimization",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub iterations_per_second: f64,
    /// Wall time of the whole benchmark run.
    pub average_time_ms: f64,
    pub test_equity: f64,
    pub grade: PerformanceGrade,
    pub result: EquityResult,
}

pub fn benchmark_equity() -> BenchmarkReport {
    benchmark_equity_with(&SimConfig::default().with_iterations(BENCH_ITERATIONS))
}

/// Same scenario with caller-chosen iterations, seed and threads.
pub fn benchmark_equity_with(config: &SimConfig) -> BenchmarkReport {
    let started = Instant::now();
    let result = calculate_equity(&BENCH_HERO, BENCH_RANGE, &[], config);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let iterations_per_second = if elapsed_ms > 0.0 {
        (result.total_iterations as f64 / (elapsed_ms / 1000.0)).round()
    } else {
        0.0
    };
    let grade = PerformanceGrade::from_rate(iterations_per_second);
    info!(iterations_per_second, %grade, "benchmark finished");

    BenchmarkReport {
        iterations_per_second,
        average_time_ms: elapsed_ms,
        test_equity: result.hero_equity,
        grade,
        result,
    }
}
