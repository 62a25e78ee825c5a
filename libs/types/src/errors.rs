//! Error types for order submission
//!
//! The engine has no recoverable failures once an order is accepted. Every
//! error here is a caller contract violation detected before any mutation.

use thiserror::Error;

use crate::ids::StockId;
use crate::order::Side;

/// Submission contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Wrong instrument: matcher is bound to stock {expected}, order is for stock {actual}")]
    WrongInstrument { expected: StockId, actual: StockId },

    #[error("Wrong side: expected a {expected} order, got a {actual} order")]
    WrongSide { expected: Side, actual: Side },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Order has no remaining amount")]
    AlreadyFilled,
}

/// Errors converting between decimal and tick representations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Value {value} is not a whole number of ticks at scale {scale}")]
    NotRepresentable { value: String, scale: u32 },

    #[error("Value {0} does not fit the tick range")]
    Overflow(String),

    #[error("Unsupported tick scale: {0}")]
    InvalidScale(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_instrument_display() {
        let err = OrderError::WrongInstrument {
            expected: StockId::new(1),
            actual: StockId::new(2),
        };
        assert_eq!(
            err.to_string(),
            "Wrong instrument: matcher is bound to stock 1, order is for stock 2"
        );
    }

    #[test]
    fn test_wrong_side_display() {
        let err = OrderError::WrongSide {
            expected: Side::BUY,
            actual: Side::SELL,
        };
        assert!(err.to_string().contains("BUY"));
        assert!(err.to_string().contains("SELL"));
    }

    #[test]
    fn test_invalid_price_display() {
        let err = OrderError::InvalidPrice("non-positive: 0".to_string());
        assert_eq!(err.to_string(), "Invalid price: non-positive: 0");
    }
}
