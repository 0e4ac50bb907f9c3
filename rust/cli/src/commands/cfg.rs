//! Configuration command handler.
//!
//! Displays the resolved simulation settings with their sources (default,
//! configuration file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "iterations": {
//!     "value": 10000,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let display = serde_json::json!({
        "iterations": {
            "value": config.iterations,
            "source": sources.iterations,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "threads": {
            "value": config.threads,
            "source": sources.threads,
        },
        "tie_policy": {
            "value": config.tie_policy,
            "source": sources.tie_policy,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
