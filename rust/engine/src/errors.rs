use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Invalid card format: {0:?} (expected rank + suit, e.g. \"A♠\" or \"As\")")]
    BadLength(String),
    #[error("Invalid rank: {0}")]
    BadRank(char),
    #[error("Invalid suit: {0}")]
    BadSuit(char),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Range is empty")]
    Empty,
    #[error("Range contains invalid characters")]
    InvalidCharacters,
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
    #[error("Invalid range: {0} (incorrect order)")]
    InvalidOrder(String),
    #[error("Pocket pair cannot be suited or offsuit: {0}")]
    QualifiedPair(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("Hand evaluation needs 5 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),
}

/// Error kinds surfaced by the equity entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EquityError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Computation(String),
    #[error("Calculation cancelled")]
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Computation,
    Cancelled,
}

impl EquityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EquityError::Validation(_) => ErrorKind::Validation,
            EquityError::Computation(_) => ErrorKind::Computation,
            EquityError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<CardParseError> for EquityError {
    fn from(e: CardParseError) -> Self {
        EquityError::Validation(e.to_string())
    }
}

impl From<HandError> for EquityError {
    fn from(e: HandError) -> Self {
        EquityError::Validation(e.to_string())
    }
}

impl From<RangeError> for EquityError {
    fn from(e: RangeError) -> Self {
        EquityError::Validation(format!("Range error: {}", e))
    }
}

/// Structured error carried on result objects instead of a propagated `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&EquityError> for EquityFailure {
    fn from(e: &EquityError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}
