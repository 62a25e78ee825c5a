//! Types library for the single-instrument matcher
//!
//! Core type definitions shared by the matching engine and whatever layer
//! submits orders to it.
//!
//! # Modules
//! - `ids`: Submitter-assigned identifiers (TradeId, TraderId, StockId)
//! - `numeric`: Integer tick prices and unit quantities
//! - `order`: Order construction and fill accounting
//! - `response`: Fill/cancel notifications and the sink capability
//! - `errors`: Contract violation taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod response;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::response::*;
    pub use crate::errors::*;
}
