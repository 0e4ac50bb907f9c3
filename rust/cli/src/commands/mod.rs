//! Command handler modules.
//!
//! Each subcommand lives in its own module and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, writing to the
//! injected `out`/`err` streams.

use std::time::{Duration, Instant};

use pokerlab_engine::cards::{Card, parse_card_run};
use pokerlab_engine::sampling::SimConfig;

use crate::cli::SimArgs;
use crate::config;
use crate::error::CliError;

pub mod bench;
pub mod cfg;
pub mod equity;
pub mod eval;
pub mod ev;
pub mod multiway;
pub mod range;

pub use bench::handle_bench_command;
pub use cfg::handle_cfg_command;
pub use equity::handle_equity_command;
pub use eval::handle_eval_command;
pub use ev::handle_ev_command;
pub use multiway::handle_multiway_command;
pub use range::handle_range_command;

/// Resolved configuration with command-line flags applied on top.
pub(crate) fn resolve_sim_config(args: &SimArgs) -> Result<SimConfig, CliError> {
    let base = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let mut sim = base.to_sim_config();
    if let Some(n) = args.iterations {
        sim.iterations = n;
    }
    if let Some(s) = args.seed {
        sim.seed = Some(s);
    }
    if let Some(t) = args.threads {
        sim.threads = t;
    }
    if let Some(ms) = args.timeout_ms {
        sim.deadline = Some(Instant::now() + Duration::from_millis(ms));
    }
    Ok(sim)
}

/// Parses a card run, treating a missing or blank value as no cards.
pub(crate) fn parse_card_arg(value: Option<&str>) -> Result<Vec<Card>, CliError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(parse_card_run(s)?),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_board_means_no_cards() {
        assert!(parse_card_arg(None).unwrap().is_empty());
        assert!(parse_card_arg(Some("  ")).unwrap().is_empty());
        assert_eq!(parse_card_arg(Some("As Kd 7c")).unwrap().len(), 3);
        assert!(matches!(
            parse_card_arg(Some("Ax")),
            Err(CliError::InvalidInput(_))
        ));
    }
}
