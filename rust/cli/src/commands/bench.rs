//! Bench command handler for heads-up equity throughput.
//!
//! Runs the fixed A♠K♠ vs `QQ+, AKs, AKo` scenario and reports iterations per
//! second with a coarse performance grade.

use crate::error::CliError;
use pokerlab_engine::bench::{BENCH_ITERATIONS, benchmark_equity, benchmark_equity_with};
use pokerlab_engine::sampling::SimConfig;
use std::io::Write;

/// Handle the bench command.
///
/// Without flags this is the stock benchmark; `iterations` and `seed` only
/// change the sample size and make the equity reproducible.
pub fn handle_bench_command(
    iterations: Option<u32>,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let report = if iterations.is_none() && seed.is_none() {
        benchmark_equity()
    } else {
        let mut config =
            SimConfig::default().with_iterations(iterations.unwrap_or(BENCH_ITERATIONS));
        config.seed = seed;
        benchmark_equity_with(&config)
    };
    if let Some(failure) = report.result.error.clone() {
        return Err(failure.into());
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }
    writeln!(
        out,
        "Benchmark: {} iters in {:.1} ms",
        report.result.total_iterations, report.average_time_ms
    )?;
    writeln!(
        out,
        "Throughput: {:.0} it/s ({})",
        report.iterations_per_second, report.grade
    )?;
    writeln!(out, "Test equity: {:.1}%", report.test_equity)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_command_output_format() {
        let mut out = Vec::new();
        handle_bench_command(Some(200), Some(1), false, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(
            output.contains("Benchmark: 200 iters"),
            "Output should report the iteration count: {}",
            output
        );
        assert!(output.contains("it/s"));
        assert!(output.contains("Test equity:"));
    }

    #[test]
    fn test_bench_command_seeded_equity_is_stable() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();
        handle_bench_command(Some(300), Some(9), true, &mut out1).unwrap();
        handle_bench_command(Some(300), Some(9), true, &mut out2).unwrap();

        let a: serde_json::Value = serde_json::from_slice(&out1).unwrap();
        let b: serde_json::Value = serde_json::from_slice(&out2).unwrap();
        assert_eq!(a["test_equity"], b["test_equity"]);
        assert!(a["grade"].is_string());
    }

    #[test]
    fn test_bench_command_rejects_tiny_runs() {
        let mut out = Vec::new();
        let r = handle_bench_command(Some(10), None, false, &mut out);
        assert!(matches!(r, Err(CliError::InvalidInput(_))));
    }
}
