//! Matching engine core
//!
//! The matcher owns both sides of the book for one instrument and is the
//! only thing that mutates them. Calls must be serialized by the caller;
//! separate instruments get separate matchers and share nothing.

use serde::Serialize;
use tracing::{debug, info};
use types::errors::OrderError;
use types::ids::{StockId, TradeId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::response::{CancelReason, ResponseSink};

use crate::book::{AskBook, BidBook, BookSide};
use crate::config::{MatcherConfig, SelfTradePolicy};
use crate::matching::crossing;
use crate::matching::executor::{report_cancel, MatchExecutor};

/// Price-time priority matcher bound to one instrument
pub struct Matcher<S> {
    stock_id: StockId,
    config: MatcherConfig,
    bids: BidBook<S>,
    asks: AskBook<S>,
    /// Match id and arrival sequence generation
    executor: MatchExecutor,
}

/// Result of submitting an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// Order was completely filled and never entered the book
    Filled { executions: usize },
    /// Unfilled remainder was added to the book
    Resting {
        sequence: u64,
        remaining: Quantity,
        executions: usize,
    },
}

impl SubmitResult {
    pub fn executions(&self) -> usize {
        match self {
            SubmitResult::Filled { executions } => *executions,
            SubmitResult::Resting { executions, .. } => *executions,
        }
    }

    pub fn is_resting(&self) -> bool {
        matches!(self, SubmitResult::Resting { .. })
    }
}

/// Order book snapshot for market data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSnapshot {
    pub stock_id: StockId,
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

impl<S> Matcher<S> {
    /// Create an empty matcher with the default configuration
    pub fn new(stock_id: StockId) -> Self {
        Self::with_config(stock_id, MatcherConfig::default())
    }

    /// Create an empty matcher with an explicit configuration
    pub fn with_config(stock_id: StockId, config: MatcherConfig) -> Self {
        info!(
            stock_id = stock_id.get(),
            self_trade_policy = ?config.self_trade_policy,
            level_capacity = config.level_capacity,
            "Matcher initialized"
        );

        Self {
            stock_id,
            bids: BidBook::with_level_capacity(config.level_capacity),
            asks: AskBook::with_level_capacity(config.level_capacity),
            executor: MatchExecutor::new(config.starting_match_id),
            config,
        }
    }

    pub fn stock_id(&self) -> StockId {
        self.stock_id
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn bids(&self) -> &BidBook<S> {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook<S> {
        &self.asks
    }

    /// Best bid price and the quantity resting there
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best_bid()
    }

    /// Best ask price and the quantity resting there
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best_ask()
    }

    /// Best ask minus best bid, in ticks
    pub fn spread(&self) -> Option<i64> {
        match (self.asks.best_ask_price(), self.bids.best_bid_price()) {
            (Some(ask), Some(bid)) => Some(ask.ticks_above(bid)),
            _ => None,
        }
    }

    /// Resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.bids.order_count() + self.asks.order_count()
    }

    /// Get order book snapshot
    pub fn depth(&self, levels: usize) -> BookSnapshot {
        BookSnapshot {
            stock_id: self.stock_id,
            bids: self.bids.depth_snapshot(levels),
            asks: self.asks.depth_snapshot(levels),
        }
    }

    /// Check the submission contract for an order entering through `entry`
    fn validate(&self, order: &Order<S>, entry: Side) -> Result<(), OrderError> {
        if order.stock_id() != self.stock_id {
            return Err(OrderError::WrongInstrument {
                expected: self.stock_id,
                actual: order.stock_id(),
            });
        }
        if order.side() != entry {
            return Err(OrderError::WrongSide {
                expected: entry,
                actual: order.side(),
            });
        }
        order.validate()?;

        // Matching only shrinks the remainder, so checking the full amount
        // against the level it would rest in covers every outcome
        let (fits, resting) = match entry {
            Side::BUY => (
                self.bids.can_rest(order.price(), order.remaining_amount()),
                self.bids.level_quantity(order.price()),
            ),
            Side::SELL => (
                self.asks.can_rest(order.price(), order.remaining_amount()),
                self.asks.level_quantity(order.price()),
            ),
        };
        if !fits {
            return Err(OrderError::InvalidAmount(format!(
                "{} would overflow the {} already resting at {}",
                order.remaining_amount(),
                resting,
                order.price()
            )));
        }
        Ok(())
    }
}

impl<S: ResponseSink> Matcher<S> {
    /// Submit a buy order
    ///
    /// Walks the ask book while the best ask is at or below the order's
    /// limit, then rests any remainder in the bid book.
    pub fn add_buy(&mut self, order: Order<S>) -> Result<SubmitResult, OrderError> {
        self.submit(order, Side::BUY)
    }

    /// Submit a sell order
    ///
    /// Walks the bid book while the best bid is at or above the order's
    /// limit, then rests any remainder in the ask book.
    pub fn add_sell(&mut self, order: Order<S>) -> Result<SubmitResult, OrderError> {
        self.submit(order, Side::SELL)
    }

    fn submit(&mut self, mut order: Order<S>, entry: Side) -> Result<SubmitResult, OrderError> {
        if let Err(err) = self.validate(&order, entry) {
            debug!(
                stock_id = self.stock_id.get(),
                trade_id = order.trade_id().get(),
                error = %err,
                "Order rejected"
            );
            return Err(err);
        }

        order.assign_sequence(self.executor.next_order_sequence());
        let policy = self.config.self_trade_policy;

        let executions = match entry {
            Side::BUY => match_incoming(&mut self.asks, &mut self.executor, policy, &mut order),
            Side::SELL => match_incoming(&mut self.bids, &mut self.executor, policy, &mut order),
        };

        if order.is_filled() {
            return Ok(SubmitResult::Filled { executions });
        }

        let sequence = order.sequence();
        let remaining = order.remaining_amount();
        match entry {
            Side::BUY => self.bids.insert(order),
            Side::SELL => self.asks.insert(order),
        }

        Ok(SubmitResult::Resting {
            sequence,
            remaining,
            executions,
        })
    }

    /// Cancel a resting order
    ///
    /// The order's sink receives a cancellation and the order is handed
    /// back. Returns None if no such order rests at `price` on `side`.
    pub fn cancel(&mut self, side: Side, price: Price, trade_id: TradeId) -> Option<Order<S>> {
        let removed = match side {
            Side::BUY => self.bids.remove(trade_id, price),
            Side::SELL => self.asks.remove(trade_id, price),
        };

        let Some(mut order) = removed else {
            debug!(
                stock_id = self.stock_id.get(),
                trade_id = trade_id.get(),
                "Cancel target not resting"
            );
            return None;
        };

        report_cancel(&mut order, CancelReason::UserRequested);
        debug!(
            stock_id = self.stock_id.get(),
            trade_id = trade_id.get(),
            remaining = order.remaining_amount().get(),
            "Order canceled"
        );
        Some(order)
    }
}

/// Walk the opposing book until the incoming order stops crossing or is exhausted
///
/// Returns the number of executions.
fn match_incoming<S, B>(
    book: &mut B,
    executor: &mut MatchExecutor,
    policy: SelfTradePolicy,
    incoming: &mut Order<S>,
) -> usize
where
    S: ResponseSink,
    B: BookSide<S>,
{
    let mut executions = 0;

    while !incoming.is_filled() {
        let Some((price, level)) = book.best_level_mut() else {
            break;
        };
        if !crossing::incoming_can_match(incoming.side(), incoming.price(), price) {
            break;
        }

        let Some(front) = level.peek_front() else {
            book.remove_if_empty(price);
            continue;
        };

        if policy == SelfTradePolicy::CancelResting && front.trader_id() == incoming.trader_id() {
            if let Some(mut resting) = level.pop_front() {
                report_cancel(&mut resting, CancelReason::SelfTrade);
                debug!(
                    trade_id = resting.trade_id().get(),
                    resting_side = %B::SIDE,
                    "Resting order canceled to prevent self-trade"
                );
            }
            if level.is_empty() {
                book.remove_if_empty(price);
            }
            continue;
        }

        let amount = incoming.remaining_amount().min(front.remaining_amount());
        let Some(resting) = level.fill_front(amount) else {
            break;
        };
        incoming.fill(amount);
        executions += 1;

        // Execution price is always the resting order's price. An exhausted
        // resting order leaves the book before any sink runs.
        if resting.is_filled() {
            let Some(mut exhausted) = level.pop_front() else {
                break;
            };
            if level.is_empty() {
                book.remove_if_empty(price);
            }
            executor.execute(incoming, &mut exhausted, price, amount);
        } else {
            executor.execute(incoming, resting, price, amount);
        }
    }

    executions
}
