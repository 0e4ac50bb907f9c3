//! # Pokerlab CLI Library
//!
//! Command-line front end for the `pokerlab-engine` equity calculator.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["pokerlab", "equity", "--hero", "AsAh", "--range", "22-99"];
//! let code = pokerlab_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `equity`: Heads-up equity of a hand against a range, with optional EV
//! - `multiway`: Equity against up to eight named ranges
//! - `range`: Parse a range, or list preset ranges
//! - `eval`: Evaluate 5 to 7 cards
//! - `ev`: Expected value from equity, pot and investment
//! - `bench`: Benchmark equity throughput
//! - `cfg`: Display current configuration settings

use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
mod exit_code;
pub mod formatters;
pub mod logging;
mod macros;
pub mod ui;

use clap::Parser;
use cli::{Commands, PokerlabCli};
use commands::{
    handle_bench_command, handle_cfg_command, handle_equity_command, handle_ev_command,
    handle_eval_command, handle_multiway_command, handle_range_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["equity", "multiway", "range", "eval", "ev", "bench", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when a `--timeout-ms`
/// deadline stopped the run
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["pokerlab", "ev", "--equity", "50", "--pot", "100", "--invest", "50"];
/// let code = pokerlab_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match PokerlabCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Pokerlab equity CLI");
            write_or_exit!(err, "Usage: pokerlab <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: pokerlab --help");
            return exit_code::ERROR;
        }
    };

    let outcome = match cli.cmd {
        Commands::Equity {
            hero,
            range,
            board,
            sim,
            pot,
            invest,
            json,
        } => handle_equity_command(
            &hero,
            &range,
            board.as_deref(),
            &sim,
            pot.zip(invest),
            json,
            out,
            err,
        ),
        Commands::Multiway {
            hero,
            opponents,
            board,
            sim,
            tie_policy,
            pot,
            json,
        } => handle_multiway_command(
            &hero,
            &opponents,
            board.as_deref(),
            &sim,
            tie_policy,
            pot,
            json,
            out,
            err,
        ),
        Commands::Range {
            range,
            presets,
            json,
        } => handle_range_command(range.as_deref(), presets, json, out),
        Commands::Eval { cards, json } => handle_eval_command(&cards, json, out),
        Commands::Ev {
            equity,
            pot,
            invest,
        } => handle_ev_command(equity, pot, invest, out),
        Commands::Bench {
            iterations,
            seed,
            json,
        } => handle_bench_command(iterations, seed, json, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match outcome {
        Ok(()) => exit_code::SUCCESS,
        Err(e @ CliError::Interrupted(_)) => {
            write_or_exit!(err, "{}", e);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
