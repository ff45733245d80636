//! A Texas Hold'em hand evaluator and equity calculator.
//!
//! This library provides:
//! - [`evaluate`]: a table-driven evaluator mapping any 1-7 card mask to a
//!   totally ordered 32-bit strength
//! - [`exact_equity`] / [`monte_carlo_equity`]: win and split probabilities
//!   by full board enumeration or seeded sampling
//! - [`range_equity`] / [`live_range_equity`]: range-vs-range equity,
//!   batch or streaming with cancellation
//! - [`Range`]: a set of two-card holdings with grid-cell and suit-filter
//!   construction
//! - parsers for cards, boards, hole cards, and range strings
//!
//! # Examples
//!
//! ```ignore
//! use holdem::{exact_equity, parse_board, parse_hole_cards};
//!
//! let board = parse_board("Kh 7d 2c")?;
//! let hero = parse_hole_cards("AhAs")?;
//! let villain = parse_hole_cards("8c8d")?;
//! let result = exact_equity(&board, &[hero, villain], 0);
//! println!("hero equity: {:.1}%", result.win[0] * 100.0);
//! ```

pub mod bits;
pub mod board_parser;
pub mod cards;
pub mod enumerate;
pub mod equity;
pub mod eval;
pub mod range;
pub mod range_parser;
pub mod tables;

pub use board_parser::{parse_board, parse_cards, parse_hole_cards};
pub use cards::{Board, Card, Combo, Street, DECK_SIZE, NUM_COMBOS};
pub use enumerate::{binomial, MaskCombinations};
pub use equity::{
    exact_equity, live_range_equity, monte_carlo_equity, parallel_monte_carlo_equity,
    range_equity, showdown, EquityResult, LiveConfig, LiveOutcome, PlayerStrength,
};
pub use eval::{evaluate, evaluate_cards, HandCategory, HandValue};
pub use range::Range;
pub use range_parser::parse_range;
