//! Trade execution reporting
//!
//! Issues match ids and arrival sequences and delivers the fill responses
//! of each execution to both participants.

use tracing::trace;
use types::numeric::{Price, Quantity};
use types::order::Order;
use types::response::{CancelReason, Cancellation, Completion, Fill, Response, ResponseSink};

/// Match executor for sequencing and response delivery
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    match_counter: u64,
    order_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting match id
    pub fn new(starting_match_id: u64) -> Self {
        Self {
            match_counter: starting_match_id,
            order_counter: 0,
        }
    }

    /// Get next match id (monotonically increasing)
    fn next_match_id(&mut self) -> u64 {
        let id = self.match_counter;
        self.match_counter += 1;
        id
    }

    /// Get next arrival sequence, starting from 1
    pub fn next_order_sequence(&mut self) -> u64 {
        self.order_counter += 1;
        self.order_counter
    }

    /// Report one execution between an incoming and a resting order
    ///
    /// Both orders must already carry the fill. The incoming order's sink
    /// is notified first. Returns the match id shared by the two responses.
    pub fn execute<S: ResponseSink>(
        &mut self,
        incoming: &mut Order<S>,
        resting: &mut Order<S>,
        price: Price,
        amount: Quantity,
    ) -> u64 {
        let match_id = self.next_match_id();

        trace!(
            match_id,
            incoming = incoming.trade_id().get(),
            resting = resting.trade_id().get(),
            price = price.ticks(),
            amount = amount.get(),
            "execution"
        );

        incoming.notify(Response::Fill(Fill {
            match_id,
            trade_id: incoming.trade_id(),
            counterparty_trade_id: resting.trade_id(),
            price,
            amount,
            completion: Completion::from_remaining(incoming.remaining_amount()),
        }));
        resting.notify(Response::Fill(Fill {
            match_id,
            trade_id: resting.trade_id(),
            counterparty_trade_id: incoming.trade_id(),
            price,
            amount,
            completion: Completion::from_remaining(resting.remaining_amount()),
        }));

        match_id
    }
}

/// Tell an order's owner it left the book unfilled
pub fn report_cancel<S: ResponseSink>(order: &mut Order<S>, reason: CancelReason) {
    let remaining_amount = order.remaining_amount();
    order.notify(Response::Cancelled(Cancellation {
        trade_id: order.trade_id(),
        remaining_amount,
        reason,
    }));
}
