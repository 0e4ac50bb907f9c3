//! Expected value command.

use std::io::Write;

use pokerlab_engine::ev::expected_value;

use crate::error::CliError;
use crate::formatters::{format_percent, format_signed};

pub fn handle_ev_command(
    equity: f64,
    pot: f64,
    invest: f64,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !(0.0..=100.0).contains(&equity) {
        return Err(CliError::InvalidInput(
            "equity must be between 0 and 100".into(),
        ));
    }
    if !pot.is_finite() || pot < 0.0 || !invest.is_finite() || invest < 0.0 {
        return Err(CliError::InvalidInput(
            "pot and invest must be non-negative".into(),
        ));
    }
    let ev = expected_value(equity, pot, invest);
    writeln!(
        out,
        "EV: {} (equity {}, pot {:.2}, invest {:.2})",
        format_signed(ev),
        format_percent(equity),
        pot,
        invest
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_signed_ev() {
        let mut out = Vec::new();
        handle_ev_command(25.0, 200.0, 60.0, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("EV: -10.00"));
    }

    #[test]
    fn rejects_out_of_range_equity() {
        let mut out = Vec::new();
        assert!(handle_ev_command(101.0, 10.0, 1.0, &mut out).is_err());
        assert!(handle_ev_command(50.0, -1.0, 1.0, &mut out).is_err());
    }
}
