//! Matching Engine
//!
//! Single-instrument order matching core implementing price-time priority.
//! Orders arrive through `Matcher::add_buy` / `Matcher::add_sell`, walk the
//! opposing book, and rest any unfilled remainder on their own side.
//! Fills are reported synchronously through each order's `ResponseSink`.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Execution price is the resting order's price
//! - Book is never left crossed after a call returns
//! - Conservation of quantity
//! - Deterministic matching (same inputs → same outputs)

pub mod book;
pub mod config;
pub mod matching;
pub mod engine;

pub use config::{MatcherConfig, SelfTradePolicy};
pub use engine::{BookSnapshot, Matcher, SubmitResult};
