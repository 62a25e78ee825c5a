//! Order types
//!
//! An order is built by the submitter, handed to a matcher, and from then
//! on mutated only by the matcher: its remaining amount shrinks with each
//! fill until it reaches zero and the order is dropped from the book.

use crate::errors::OrderError;
use crate::ids::{StockId, TradeId, TraderId};
use crate::numeric::{Price, Quantity};
use crate::response::{Response, ResponseSink};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => f.write_str("BUY"),
            Side::SELL => f.write_str("SELL"),
        }
    }
}

/// Price and size of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostData {
    pub price: Price,
    pub amount: Quantity,
}

/// Identity of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeData {
    pub trader_id: TraderId,
    pub trade_id: TradeId,
    pub stock_id: StockId,
}

/// A limit order together with the sink that receives its responses
///
/// `S` is the submitter's notification capability. The matcher owns the
/// order (and the sink with it) while the order rests, and drops both once
/// the order is fully filled.
pub struct Order<S> {
    trade_id: TradeId,
    trader_id: TraderId,
    stock_id: StockId,
    side: Side,
    price: Price,
    original_amount: Quantity,
    remaining_amount: Quantity,
    sequence: u64,
    sink: S,
}

impl<S> Order<S> {
    /// Create a new unfilled order
    pub fn new(cost: CostData, trade: TradeData, sink: S, side: Side) -> Self {
        Self {
            trade_id: trade.trade_id,
            trader_id: trade.trader_id,
            stock_id: trade.stock_id,
            side,
            price: cost.price,
            original_amount: cost.amount,
            remaining_amount: cost.amount,
            sequence: 0,
            sink,
        }
    }

    pub fn trade_id(&self) -> TradeId {
        self.trade_id
    }

    pub fn trader_id(&self) -> TraderId {
        self.trader_id
    }

    pub fn stock_id(&self) -> StockId {
        self.stock_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn original_amount(&self) -> Quantity {
        self.original_amount
    }

    pub fn remaining_amount(&self) -> Quantity {
        self.remaining_amount
    }

    pub fn filled_amount(&self) -> Quantity {
        self.original_amount - self.remaining_amount
    }

    /// Arrival sequence assigned by the matcher (0 until submitted)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_amount.is_zero()
    }

    /// Give the sink back to the submitter
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Check the submission contract for price and amounts
    pub fn validate(&self) -> Result<(), OrderError> {
        if !self.price.is_positive() {
            return Err(OrderError::InvalidPrice(format!("non-positive: {}", self.price)));
        }
        if self.original_amount.is_zero() {
            return Err(OrderError::InvalidAmount("zero".to_string()));
        }
        if self.remaining_amount.is_zero() {
            return Err(OrderError::AlreadyFilled);
        }
        Ok(())
    }

    /// Stamp the arrival sequence; called by the matcher on submission
    pub fn assign_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    /// Reduce the remaining amount by one fill
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining amount
    pub fn fill(&mut self, amount: Quantity) {
        assert!(
            amount <= self.remaining_amount,
            "Fill would exceed remaining amount"
        );
        self.remaining_amount -= amount;
    }
}

impl<S: ResponseSink> Order<S> {
    /// Deliver a response to this order's owner
    pub fn notify(&mut self, response: Response) {
        self.sink.notify(response);
    }
}

impl<S> fmt::Debug for Order<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("trade_id", &self.trade_id)
            .field("trader_id", &self.trader_id)
            .field("stock_id", &self.stock_id)
            .field("side", &self.side)
            .field("price", &self.price)
            .field("original_amount", &self.original_amount)
            .field("remaining_amount", &self.remaining_amount)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_fills_conserve_quantity(
            original in 1u64..1_000,
            fills in proptest::collection::vec(1u64..100, 0..20),
        ) {
            let mut order = Order::new(
                CostData { price: Price::from_ticks(10), amount: Quantity::new(original) },
                TradeData {
                    trader_id: TraderId::new(1),
                    trade_id: TradeId::new(1),
                    stock_id: StockId::new(1),
                },
                (),
                Side::SELL,
            );

            for fill in fills {
                let amount = Quantity::new(fill).min(order.remaining_amount());
                order.fill(amount);
                prop_assert_eq!(
                    order.filled_amount() + order.remaining_amount(),
                    order.original_amount()
                );
            }
        }
    }
}
