//! Multiway equity command.

use std::collections::BTreeMap;
use std::io::Write;

use pokerlab_engine::ev::multiway_expected_values;
use pokerlab_engine::multiway::{HERO, MultiwayResult, Opponent, calculate_multiway_equity};
use serde::Serialize;

use super::{parse_card_arg, resolve_sim_config};
use crate::cli::{SimArgs, TiePolicyArg};
use crate::error::CliError;
use crate::formatters::{format_board, format_percent, format_signed};
use crate::ui;

#[derive(Debug, Serialize)]
struct MultiwayReport<'a> {
    #[serde(flatten)]
    result: &'a MultiwayResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    ev: Option<BTreeMap<String, f64>>,
}

/// Splits `NAME=RANGE`; the range may itself contain commas.
pub(crate) fn parse_opponent(arg: &str) -> Result<Opponent, CliError> {
    let (name, range) = arg.split_once('=').ok_or_else(|| {
        CliError::InvalidInput(format!("Opponent must be NAME=RANGE, got '{}'", arg))
    })?;
    Ok(Opponent::new(name.trim(), range.trim()))
}

#[allow(clippy::too_many_arguments)]
pub fn handle_multiway_command(
    hero: &str,
    opponents: &[String],
    board: Option<&str>,
    sim: &SimArgs,
    tie_policy: Option<TiePolicyArg>,
    pot: Option<f64>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let hero_cards = parse_card_arg(Some(hero))?;
    let board_cards = parse_card_arg(board)?;
    let opponents = opponents
        .iter()
        .map(|s| parse_opponent(s))
        .collect::<Result<Vec<_>, _>>()?;
    let mut config = resolve_sim_config(sim)?;
    if let Some(policy) = tie_policy {
        config.tie_policy = policy.into();
    }

    let result = calculate_multiway_equity(&hero_cards, &opponents, &board_cards, &config);
    if let Some(failure) = result.error.clone() {
        return Err(failure.into());
    }
    if result.total_iterations < config.iterations {
        ui::display_warning(
            err,
            &format!(
                "{} of {} iterations were usable; the rest had no compatible hand for some opponent",
                result.total_iterations, config.iterations
            ),
        )?;
    }

    let ev = pot.map(|p| multiway_expected_values(&result, p));
    if json {
        let report = MultiwayReport {
            result: &result,
            ev,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "Board: {}", format_board(&board_cards))?;
    writeln!(out, "Tie policy: {}", result.tie_policy)?;
    // hero first, then opponents in the order given
    let order = std::iter::once(HERO).chain(opponents.iter().map(|o| o.name.as_str()));
    for name in order {
        let Some(p) = result.player(name) else {
            continue;
        };
        write!(
            out,
            "{:<12} {:>6} {} wins {} ties {}",
            name,
            format_percent(p.equity),
            ui::percent_bar(p.equity, 20),
            p.wins,
            p.ties
        )?;
        if let Some(v) = ev.as_ref().and_then(|m| m.get(name)) {
            write!(out, " EV {}", format_signed(*v))?;
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "{} iterations in {:.1} ms",
        result.total_iterations, result.calculation_time_ms
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_spec_keeps_commas_in_range() {
        let o = parse_opponent("bob=QQ+, AKs").unwrap();
        assert_eq!(o.name, "bob");
        assert_eq!(o.range, "QQ+, AKs");
        assert!(parse_opponent("bob").is_err());
    }

    #[test]
    fn reports_every_player() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let sim = SimArgs {
            iterations: Some(300),
            seed: Some(2),
            ..SimArgs::default()
        };
        handle_multiway_command(
            "AsAh",
            &["bob=KK".to_string(), "eve=22+".to_string()],
            None,
            &sim,
            Some(TiePolicyArg::Split),
            Some(90.0),
            false,
            &mut out,
            &mut err,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Tie policy: split"));
        for name in ["hero", "bob", "eve"] {
            assert!(text.contains(name), "{}", text);
        }
        assert!(text.contains(" EV "));
    }
}
