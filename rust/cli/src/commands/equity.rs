//! Heads-up equity command.

use std::io::Write;

use pokerlab_engine::equity::{EquityResult, calculate_equity};
use pokerlab_engine::ev::HeadsUpEv;
use serde::Serialize;
use tracing::debug;

use super::{parse_card_arg, resolve_sim_config};
use crate::cli::SimArgs;
use crate::error::CliError;
use crate::formatters::{format_board, format_percent, format_signed};
use crate::ui;

#[derive(Debug, Serialize)]
struct EquityReport<'a> {
    #[serde(flatten)]
    result: &'a EquityResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    ev: Option<HeadsUpEv>,
}

/// `stake` is `(pot, investment)` when EV output was requested.
#[allow(clippy::too_many_arguments)]
pub fn handle_equity_command(
    hero: &str,
    range: &str,
    board: Option<&str>,
    sim: &SimArgs,
    stake: Option<(f64, f64)>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let hero_cards = parse_card_arg(Some(hero))?;
    let board_cards = parse_card_arg(board)?;
    let config = resolve_sim_config(sim)?;
    debug!(?config, "running heads-up equity");

    let result = calculate_equity(&hero_cards, range, &board_cards, &config);
    if let Some(failure) = result.error.clone() {
        return Err(failure.into());
    }
    if result.total_iterations < config.iterations {
        ui::display_warning(
            err,
            &format!(
                "{} of {} iterations produced a showdown",
                result.total_iterations, config.iterations
            ),
        )?;
    }

    let ev = stake.map(|(pot, invest)| HeadsUpEv::from_result(&result, pot, invest));
    if json {
        let report = EquityReport {
            result: &result,
            ev,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "Hero:    {}", format_board(&hero_cards))?;
    writeln!(out, "Villain: {}", range.trim())?;
    writeln!(out, "Board:   {}", format_board(&board_cards))?;
    writeln!(
        out,
        "Hero equity:    {:>6} {}",
        format_percent(result.hero_equity),
        ui::percent_bar(result.hero_equity, 20)
    )?;
    writeln!(
        out,
        "Villain equity: {:>6} {}",
        format_percent(result.villain_equity),
        ui::percent_bar(result.villain_equity, 20)
    )?;
    writeln!(
        out,
        "Wins/Losses/Ties: {} / {} / {} ({} iterations)",
        result.hero_wins, result.villain_wins, result.ties, result.total_iterations
    )?;
    writeln!(
        out,
        "Time: {:.1} ms ({:.0} it/s)",
        result.calculation_time_ms,
        result.iterations_per_second()
    )?;
    if let Some(ev) = ev {
        writeln!(
            out,
            "EV: hero {} / villain {}",
            format_signed(ev.hero),
            format_signed(ev.villain)
        )?;
    }
    Ok(())
}
