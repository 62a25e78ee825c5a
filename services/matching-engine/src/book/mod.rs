//! Order book infrastructure module
//!
//! Contains price levels, bid book, and ask book implementations.

pub mod price_level;
pub mod bid_book;
pub mod ask_book;

pub use price_level::PriceLevel;
pub use bid_book::BidBook;
pub use ask_book::AskBook;

use types::numeric::Price;
use types::order::Side;

/// What the matching loop needs from the book it walks
pub(crate) trait BookSide<S> {
    /// Side of the orders resting in this book
    const SIDE: Side;

    /// Level at the most aggressive price
    fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel<S>)>;

    fn remove_if_empty(&mut self, price: Price);
}
