//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap so level iteration order is deterministic.

use std::collections::BTreeMap;
use std::fmt;
use types::ids::TradeId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::PriceLevel;
use super::BookSide;

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order.
pub struct BidBook<S> {
    /// Price levels keyed by exact price; best bid is the last key
    levels: BTreeMap<Price, PriceLevel<S>>,
    /// Initial queue capacity for new levels
    level_capacity: usize,
}

impl<S> BidBook<S> {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self::with_level_capacity(0)
    }

    /// Create a new empty bid book whose levels preallocate `capacity` slots
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

    /// Remove an order from the bid book
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

    /// Get the level at the highest price
    pub fn best_level(&self) -> Option<(Price, &PriceLevel<S>)> {
        self.levels.iter().next_back().map(|(price, level)| (*price, level))
    }

    /// Get the best bid (highest price) and the quantity resting there
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.best_level().map(|(price, level)| (price, level.total_quantity()))
    }

    /// Get the best bid price
    pub fn best_bid_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Iterate levels from best (highest) to worst
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel<S>)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .take(depth)
            .map(|(price, level)| (price, level.total_quantity()))
            .collect()
    }

    /// Check if the bid book is empty
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

impl<S> BookSide<S> for BidBook<S> {
    const SIDE: Side = Side::BUY;

    fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel<S>)> {
        self.levels.iter_mut().next_back().map(|(price, level)| (*price, level))
    }

    fn remove_if_empty(&mut self, price: Price) {
        BidBook::remove_if_empty(self, price)
    }
}

impl<S> Default for BidBook<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for BidBook<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.levels.iter().rev()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{StockId, TraderId};
    use types::order::{CostData, TradeData};

    fn create_test_order(trade_id: u32, price: i64, amount: u64) -> Order<()> {
        Order::new(
            CostData {
                price: Price::from_ticks(price),
                amount: Quantity::new(amount),
            },
            TradeData {
                trader_id: TraderId::new(trade_id),
                trade_id: TradeId::new(trade_id),
                stock_id: StockId::new(1),
            },
            (),
            Side::BUY,
        )
    }

    #[test]
    fn test_bid_book_insert() {
        let mut book = BidBook::new();
        book.insert(create_test_order(1, 500, 15));

        assert_eq!(book.level_count(), 1);
        assert_eq!(book.order_count(), 1);
        assert!(!book.is_empty());
    }

    #[test]
    fn test_bid_book_best_bid() {
        let mut book = BidBook::new();

        book.insert(create_test_order(1, 500, 10));
        book.insert(create_test_order(2, 510, 20)); // Higher price
        book.insert(create_test_order(3, 490, 15)); // Lower price

        let (best_price, best_qty) = book.best_bid().unwrap();
        assert_eq!(best_price, Price::from_ticks(510)); // Highest price
        assert_eq!(best_qty, Quantity::new(20));
        assert_eq!(book.best_bid_price(), Some(Price::from_ticks(510)));
    }

    #[test]
    fn test_bid_book_remove() {
        let mut book = BidBook::new();
        book.insert(create_test_order(1, 500, 10));
        assert_eq!(book.level_count(), 1);

        let removed = book.remove(TradeId::new(1), Price::from_ticks(500));
        assert!(removed.is_some());
        assert!(book.is_empty());

        assert!(book.remove(TradeId::new(1), Price::from_ticks(500)).is_none());
    }

    #[test]
    fn test_bid_book_remove_if_empty_keeps_populated_level() {
        let mut book = BidBook::new();
        book.insert(create_test_order(1, 500, 10));

        book.remove_if_empty(Price::from_ticks(500));
        assert_eq!(book.level_count(), 1);

        // Absent level is a no-op
        book.remove_if_empty(Price::from_ticks(400));
        assert_eq!(book.level_count(), 1);
    }

    #[test]
    fn test_bid_book_depth_snapshot() {
        let mut book = BidBook::new();

        book.insert(create_test_order(1, 500, 10));
        book.insert(create_test_order(2, 510, 20));
        book.insert(create_test_order(3, 490, 15));
        book.insert(create_test_order(4, 520, 5));

        let depth = book.depth_snapshot(2);

        // Should return top 2 levels (highest prices first)
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0].0, Price::from_ticks(520));
        assert_eq!(depth[1].0, Price::from_ticks(510));
    }

    #[test]
    fn test_bid_book_price_time_priority() {
        let mut book = BidBook::new();

        book.insert(create_test_order(1, 500, 10));
        book.insert(create_test_order(2, 500, 20)); // Same price

        // Both orders at same price level
        assert_eq!(book.level_count(), 1);

        let (price, level) = book.best_level().unwrap();
        assert_eq!(price, Price::from_ticks(500));
        assert_eq!(level.total_quantity(), Quantity::new(30));
        assert_eq!(level.peek_front().unwrap().trade_id(), TradeId::new(1));
    }

    #[test]
    fn test_bid_book_best_level_mut_is_highest() {
        let mut book = BidBook::new();
        book.insert(create_test_order(1, 500, 10));
        book.insert(create_test_order(2, 505, 10));

        let (price, _) = book.best_level_mut().unwrap();
        assert_eq!(price, Price::from_ticks(505));
    }

    #[test]
    fn test_bid_book_can_rest_checks_only_target_level() {
        let mut book = BidBook::new();
        book.insert(create_test_order(1, 500, u64::MAX));
        book.insert(create_test_order(2, 499, u64::MAX));

        assert!(!book.can_rest(Price::from_ticks(500), Quantity::new(1)));
        assert!(book.can_rest(Price::from_ticks(501), Quantity::new(u64::MAX)));
        assert_eq!(book.level_quantity(Price::from_ticks(500)), Quantity::new(u64::MAX));
        assert_eq!(book.level_quantity(Price::from_ticks(498)), Quantity::ZERO);
        assert_eq!(book.total_quantity(), 2 * u128::from(u64::MAX));
    }
}
