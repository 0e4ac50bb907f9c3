//! Error types for the CLI application.
//!
//! Engine errors are folded into [`CliError`] so every handler can use `?`
//! and the dispatcher maps variants to exit codes in one place.

use std::fmt;

use pokerlab_engine::errors::{CardParseError, EquityError, EquityFailure, ErrorKind, HandError};

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config file reads)
    Io(std::io::Error),

    /// Invalid user input: cards, ranges, numeric bounds
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Simulation ran but produced no usable result
    Engine(String),

    /// Run stopped before finishing (deadline reached)
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}

impl From<CardParseError> for CliError {
    fn from(error: CardParseError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<HandError> for CliError {
    fn from(error: HandError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<EquityError> for CliError {
    fn from(error: EquityError) -> Self {
        match error {
            EquityError::Validation(msg) => CliError::InvalidInput(msg),
            EquityError::Computation(msg) => CliError::Engine(msg),
            EquityError::Cancelled => CliError::Interrupted("deadline reached".into()),
        }
    }
}

impl From<EquityFailure> for CliError {
    fn from(failure: EquityFailure) -> Self {
        match failure.kind {
            ErrorKind::Validation => CliError::InvalidInput(failure.message),
            ErrorKind::Computation => CliError::Engine(failure.message),
            ErrorKind::Cancelled => CliError::Interrupted("deadline reached".into()),
        }
    }
}
