//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the bid must be at or
/// above the ask.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order can match against a resting price
///
/// A buy never lifts an ask above its limit; a sell never hits a bid
/// below its limit.
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::BUY => can_match(incoming_price, resting_price),
        Side::SELL => can_match(resting_price, incoming_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_match_crossing() {
        let bid = Price::from_ticks(500);
        let ask = Price::from_ticks(490);
        assert!(can_match(bid, ask), "Bid >= ask should match");
    }

    #[test]
    fn test_can_match_exact() {
        let price = Price::from_ticks(500);
        assert!(can_match(price, price), "Equal prices should match");
    }

    #[test]
    fn test_can_match_no_cross() {
        let bid = Price::from_ticks(490);
        let ask = Price::from_ticks(500);
        assert!(!can_match(bid, ask), "Bid < ask should not match");
    }

    #[test]
    fn test_incoming_buy_can_match() {
        let buy_price = Price::from_ticks(500);
        assert!(incoming_can_match(Side::BUY, buy_price, Price::from_ticks(490)));
        assert!(!incoming_can_match(Side::BUY, buy_price, Price::from_ticks(501)));
    }

    #[test]
    fn test_incoming_sell_can_match() {
        let sell_price = Price::from_ticks(490);
        assert!(incoming_can_match(Side::SELL, sell_price, Price::from_ticks(500)));
        assert!(!incoming_can_match(Side::SELL, sell_price, Price::from_ticks(489)));
    }
}
