//! Matching logic module
//!
//! Crossing predicates and execution reporting for price-time priority matching

pub mod crossing;
pub mod executor;
