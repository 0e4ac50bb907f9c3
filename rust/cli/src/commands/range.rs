//! Range inspection command.

use std::io::Write;

use pokerlab_engine::range::{example_ranges, parse_range};

use crate::error::CliError;

pub fn handle_range_command(
    range: Option<&str>,
    presets: bool,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if presets {
        return write_presets(json, out);
    }
    let range = range.unwrap_or_default();
    let parsed = parse_range(range);
    if let Some(e) = parsed.error {
        return Err(CliError::InvalidInput(e));
    }

    let names: Vec<String> = parsed.hands.iter().map(|h| h.to_string()).collect();
    if json {
        let v = serde_json::json!({
            "range": range.trim(),
            "hands": names,
            "total_combos": parsed.total_combos,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&v)?)?;
    } else {
        writeln!(out, "Hands: {}", names.join(", "))?;
        writeln!(out, "Combos: {}", parsed.total_combos)?;
    }
    Ok(())
}

fn write_presets(json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let presets = example_ranges();
    if json {
        let map: serde_json::Map<String, serde_json::Value> = presets
            .iter()
            .map(|(name, range)| (name.to_string(), serde_json::Value::from(*range)))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&map)?)?;
        return Ok(());
    }
    for (name, range) in presets {
        let combos = parse_range(range).total_combos;
        writeln!(out, "{:<8} {:<40} {:>4} combos", name, range, combos)?;
    }
    Ok(())
}
