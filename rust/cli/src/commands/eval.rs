//! Hand evaluation command.

use std::io::Write;

use pokerlab_engine::cards::parse_card_run;
use pokerlab_engine::hand::evaluate_hand;

use crate::error::CliError;
use crate::formatters::format_board;

pub fn handle_eval_command(cards: &str, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_card_run(cards)?;
    let eval = evaluate_hand(&cards)?;

    if json {
        let v = serde_json::json!({
            "cards": cards.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            "category": eval.category.name(),
            "value": eval.value,
            "kickers": eval.kickers,
            "description": eval.description(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&v)?)?;
        return Ok(());
    }
    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(out, "Hand: {}", eval.description())?;
    writeln!(out, "Category: {} ({})", eval.category, eval.category as u8)?;
    writeln!(out, "Value: {}", eval.value)?;
    Ok(())
}
