//! toxscreen — MT5 trading-history toxicity screener.
//!
//! Classifies closed trades from an MT5 deals export into suspicious-behavior
//! categories (scalping, HFT band, arbitrage-short) and combines aggregate
//! features into a composite toxicity score with a risk tier.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
