//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap so level iteration order is deterministic.

use std::collections::BTreeMap;
use std::fmt;
use types::ids::TradeId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::PriceLevel;
use super::BookSide;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order.
pub struct AskBook<S> {
    /// Price levels keyed by exact price; best ask is the first key
    levels: BTreeMap<Price, PriceLevel<S>>,
    /// Initial queue capacity for new levels
    level_capacity: usize,
}

impl<S> AskBook<S> {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self::with_level_capacity(0)
    }

    /// Create a new empty ask book whose levels preallocate `capacity` slots
    pub fn with_level_capacity(capacity: usize) -> Self {
        Self {
            levels: BTreeMap::new(),
            level_capacity: capacity,
        }
    }

    /// Insert an order at the tail of its price level, creating the level if absent
    pub fn insert(&mut self, order: Order<S>) {
        let capacity = self.level_capacity;
        self.levels
            .entry(order.price())
            .or_insert_with(|| PriceLevel::with_capacity(capacity))
            .push(order);
    }

    /// Remove an order from the ask book
    ///
    /// Returns the order if it was found at `price`
    pub fn remove(&mut self, trade_id: TradeId, price: Price) -> Option<Order<S>> {
        let order = self.levels.get_mut(&price)?.remove(trade_id)?;
        self.remove_if_empty(price);
        Some(order)
    }

    /// Drop the level at `price` once its queue is empty
    pub fn remove_if_empty(&mut self, price: Price) {
        if self.levels.get(&price).is_some_and(|level| level.is_empty()) {
            self.levels.remove(&price);
        }
    }

    /// Get the level at the lowest price
    pub fn best_level(&self) -> Option<(Price, &PriceLevel<S>)> {
        self.levels.iter().next().map(|(price, level)| (*price, level))
    }

    /// Get the best ask (lowest price) and the quantity resting there
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.best_level().map(|(price, level)| (price, level.total_quantity()))
    }

    /// Get the best ask price
    pub fn best_ask_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Iterate levels from best (lowest) to worst
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel<S>)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .take(depth)
            .map(|(price, level)| (price, level.total_quantity()))
            .collect()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }

    /// Quantity resting at exactly `price`, zero if there is no level
    pub fn level_quantity(&self, price: Price) -> Quantity {
        self.levels
            .get(&price)
            .map_or(Quantity::ZERO, PriceLevel::total_quantity)
    }

    /// Whether an order of `amount` can rest at `price` without overflowing the level
    pub fn can_rest(&self, price: Price, amount: Quantity) -> bool {
        self.levels
            .get(&price)
            .map_or(true, |level| level.can_accept(amount))
    }

    /// Get the remaining quantity across all levels
    ///
    /// Widened to u128 since each level may hold up to `u64::MAX`.
    pub fn total_quantity(&self) -> u128 {
        self.levels
            .values()
            .map(|level| u128::from(level.total_quantity().get()))
            .sum()
    }
}

impl<S> BookSide<S> for AskBook<S> {
    const SIDE: Side = Side::SELL;

    fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel<S>)> {
        self.levels.iter_mut().next().map(|(price, level)| (*price, level))
    }

    fn remove_if_empty(&mut self, price: Price) {
        AskBook::remove_if_empty(self, price)
    }
}

impl<S> Default for AskBook<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for AskBook<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.levels.iter()).finish()
    }
}
