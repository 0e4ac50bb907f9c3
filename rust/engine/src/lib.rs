//! # pokerlab-engine: Hold'em Equity Engine Core
//!
//! Monte Carlo equity for Texas Hold'em: a hero hand against a villain range
//! heads-up, or against several named ranges multiway. Ranges use the usual
//! shorthand (`QQ+`, `ATs+`, `KQo`, `99-77`), hands are evaluated exactly
//! from 5, 6 or 7 cards, and seeded runs are reproducible.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), parsing and bit masks
//! - [`range`] - Range notation parser
//! - [`combos`] - Suit expansion of range descriptors and dead-card filtering
//! - [`hand`] - Hand evaluation and strength comparison
//! - [`deck`] - Sampling without replacement and board completion
//! - [`sampling`] - Run configuration, cancellation and the sharded driver
//! - [`equity`] - Heads-up equity
//! - [`multiway`] - Multiway equity
//! - [`ev`] - Expected value helpers
//! - [`bench`] - Throughput benchmark
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use pokerlab_engine::cards::parse_card_run;
//! use pokerlab_engine::equity::calculate_equity;
//! use pokerlab_engine::sampling::SimConfig;
//!
//! let hero = parse_card_run("AsKs").unwrap();
//! let config = SimConfig::default().with_iterations(1_000).with_seed(42);
//! let result = calculate_equity(&hero, "QQ+, AKo", &[], &config);
//!
//! assert!(result.error.is_none());
//! assert_eq!(result.hero_wins + result.villain_wins + result.ties, result.total_iterations);
//! ```
//!
//! ## Hand Evaluation
//!
//! ```rust
//! use pokerlab_engine::cards::parse_card_run;
//! use pokerlab_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_card_run("AhKhQhJhTh2c3d").unwrap();
//! let eval = evaluate_hand(&cards).unwrap();
//! assert_eq!(eval.category, Category::RoyalFlush);
//! ```
//!
//! ## Errors
//!
//! [`equity::calculate_equity`] and [`multiway::calculate_multiway_equity`]
//! never panic and never return `Err`: a failure is reported through the
//! `error` field of the result. The `try_` variants return
//! [`errors::EquityError`] instead.

pub mod bench;
pub mod cards;
pub mod combos;
pub mod deck;
pub mod equity;
pub mod errors;
pub mod ev;
pub mod hand;
pub mod multiway;
pub mod range;
pub mod sampling;

pub use cards::{Card, CardMask, Rank, Suit};
pub use equity::{calculate_equity, try_calculate_equity, EquityResult};
pub use errors::{EquityError, EquityFailure, ErrorKind};
pub use hand::{evaluate_hand, HandEvaluation};
pub use multiway::{calculate_multiway_equity, MultiwayResult, Opponent};
pub use range::{parse_range, RangeResult};
pub use sampling::{CancelToken, SimConfig, TiePolicy};
