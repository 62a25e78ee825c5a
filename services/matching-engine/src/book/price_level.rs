//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at one exact price.
//! Orders are kept in arrival order to enforce time priority: the front
//! of the queue is always the earliest submission still resting.

use std::collections::VecDeque;
use std::fmt;
use types::ids::TradeId;
use types::numeric::Quantity;
use types::order::Order;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching and keeps
/// the sum of remaining amounts so depth queries never walk the queue.
pub struct PriceLevel<S> {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<Order<S>>,
    /// Total remaining quantity available at this level
    total_quantity: Quantity,
}

impl<S> PriceLevel<S> {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Create an empty level with room for `capacity` orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            orders: VecDeque::with_capacity(capacity),
            total_quantity: Quantity::zero(),
        }
    }

    /// Whether `amount` more can rest here without overflowing the level total
    pub fn can_accept(&self, amount: Quantity) -> bool {
        self.total_quantity.checked_add(amount).is_some()
    }

    /// Append an order at the back of the queue (time priority)
    ///
    /// # Panics
    /// Panics if the level total would overflow; check `can_accept` first
    pub fn push(&mut self, order: Order<S>) {
        self.total_quantity += order.remaining_amount();
        self.orders.push_back(order);
    }

    /// Peek at the earliest order without removing it
    pub fn peek_front(&self) -> Option<&Order<S>> {
        self.orders.front()
    }

    /// Pop the earliest order from the queue
    pub fn pop_front(&mut self) -> Option<Order<S>> {
        let order = self.orders.pop_front()?;
        self.total_quantity -= order.remaining_amount();
        Some(order)
    }

    /// Fill the front order by `amount` and return it
    ///
    /// The order stays queued even when exhausted; the caller pops it
    /// before reporting the fill.
    pub(crate) fn fill_front(&mut self, amount: Quantity) -> Option<&mut Order<S>> {
        let front = self.orders.front_mut()?;
        front.fill(amount);
        self.total_quantity -= amount;
        Some(front)
    }

    /// Remove an order from anywhere in the queue by trade id
    pub fn remove(&mut self, trade_id: TradeId) -> Option<Order<S>> {
        let position = self.orders.iter().position(|order| order.trade_id() == trade_id)?;
        let order = self.orders.remove(position)?;
        self.total_quantity -= order.remaining_amount();
        Some(order)
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total remaining quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Iterate orders from earliest to latest
    pub fn iter(&self) -> impl Iterator<Item = &Order<S>> {
        self.orders.iter()
    }
}

impl<S> Default for PriceLevel<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for PriceLevel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceLevel")
            .field("orders", &self.orders)
            .field("total_quantity", &self.total_quantity)
            .finish()
    }
}
