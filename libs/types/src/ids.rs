//! Identifier types for matching entities
//!
//! All identifiers are assigned outside the engine. The submitter picks the
//! trade and trader ids, and routing picks the stock id. The engine only
//! compares and echoes them back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single order submission
///
/// Chosen by the submitter and echoed in every response so fills can be
/// correlated back to the originating request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(u32);

impl TradeId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for TradeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account on whose behalf an order was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraderId(u32);

impl TraderId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for TraderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instrument identifier
///
/// A matcher is bound to exactly one stock id for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockId(u32);

impl StockId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for StockId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for StockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(TradeId::new(7), TradeId::from(7));
        assert_ne!(TraderId::new(1), TraderId::new(2));
        assert_eq!(StockId::new(3).get(), 3);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(TradeId::new(42).to_string(), "42");
        assert_eq!(StockId::new(1).to_string(), "1");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let json = serde_json::to_string(&TraderId::new(9)).unwrap();
        assert_eq!(json, "9");

        let deserialized: TraderId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TraderId::new(9));
    }
}
