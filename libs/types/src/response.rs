//! Responses delivered to order owners
//!
//! A response is an ephemeral message: the engine builds it, hands it to
//! the order's sink, and keeps nothing. How it travels from there (kept in
//! process, queued, sent to another thread) is up to the sink.

use crate::ids::TradeId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// Whether a fill left the reported order with quantity remaining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Completion {
    Partial,
    Full,
}

impl Completion {
    pub fn from_remaining(remaining: Quantity) -> Self {
        if remaining.is_zero() {
            Completion::Full
        } else {
            Completion::Partial
        }
    }
}

/// Why a resting order left the book without filling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelReason {
    UserRequested,
    SelfTrade,
}

/// One side's view of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Shared by both responses of the same execution
    pub match_id: u64,
    /// Order this response reports on
    pub trade_id: TradeId,
    pub counterparty_trade_id: TradeId,
    /// Always the resting order's price
    pub price: Price,
    pub amount: Quantity,
    pub completion: Completion,
}

/// Removal of a resting order without execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    pub trade_id: TradeId,
    pub remaining_amount: Quantity,
    pub reason: CancelReason,
}

/// Notification sent to an order's sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Response {
    Fill(Fill),
    Cancelled(Cancellation),
}

impl Response {
    /// Order this response reports on
    pub fn trade_id(&self) -> TradeId {
        match self {
            Response::Fill(fill) => fill.trade_id,
            Response::Cancelled(cancel) => cancel.trade_id,
        }
    }

    pub fn as_fill(&self) -> Option<&Fill> {
        match self {
            Response::Fill(fill) => Some(fill),
            Response::Cancelled(_) => None,
        }
    }

    /// True if no further responses will follow for this order
    pub fn is_final(&self) -> bool {
        match self {
            Response::Fill(fill) => fill.completion == Completion::Full,
            Response::Cancelled(_) => true,
        }
    }
}

/// Capability through which the engine reaches an order's owner
///
/// Invoked synchronously on the matching thread, once per event, in the
/// order events occur. Implementations must return promptly: a slow sink
/// stalls matching for the whole instrument. Failures are the sink's
/// concern; the engine never retries.
///
/// Sinks should not panic. A panic unwinds out of the matcher call with
/// the book still consistent: fills already applied stay applied and
/// exhausted orders are already off the book, but responses not yet
/// delivered for that call are lost.
pub trait ResponseSink {
    fn notify(&mut self, response: Response);
}

impl<F> ResponseSink for F
where
    F: FnMut(Response),
{
    fn notify(&mut self, response: Response) {
        self(response)
    }
}

/// Cross-thread delivery; a disconnected receiver drops the response
impl ResponseSink for Sender<Response> {
    fn notify(&mut self, response: Response) {
        let _ = self.send(response);
    }
}

impl ResponseSink for Box<dyn ResponseSink + Send> {
    fn notify(&mut self, response: Response) {
        (**self).notify(response)
    }
}

/// Borrowed channel, for owners that keep the sender themselves
impl ResponseSink for &mut Sender<Response> {
    fn notify(&mut self, response: Response) {
        (**self).notify(response)
    }
}

/// Borrowed trait object, for sinks that outlive the matcher
impl<'a> ResponseSink for &'a mut (dyn ResponseSink + Send + 'a) {
    fn notify(&mut self, response: Response) {
        (**self).notify(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn sample_fill(completion: Completion) -> Response {
        Response::Fill(Fill {
            match_id: 1,
            trade_id: TradeId::new(1),
            counterparty_trade_id: TradeId::new(2),
            price: Price::from_ticks(100),
            amount: Quantity::new(3),
            completion,
        })
    }

    fn deliver<S: ResponseSink>(mut sink: S, response: Response) {
        sink.notify(response);
    }

    #[test]
    fn test_completion_from_remaining() {
        assert_eq!(Completion::from_remaining(Quantity::ZERO), Completion::Full);
        assert_eq!(Completion::from_remaining(Quantity::new(1)), Completion::Partial);
    }

    #[test]
    fn test_response_accessors() {
        let partial = sample_fill(Completion::Partial);
        assert_eq!(partial.trade_id(), TradeId::new(1));
        assert!(!partial.is_final());
        assert_eq!(partial.as_fill().map(|f| f.amount), Some(Quantity::new(3)));

        let cancelled = Response::Cancelled(Cancellation {
            trade_id: TradeId::new(4),
            remaining_amount: Quantity::new(2),
            reason: CancelReason::UserRequested,
        });
        assert!(cancelled.is_final());
        assert!(cancelled.as_fill().is_none());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |response: Response| seen.push(response);
            sink.notify(sample_fill(Completion::Full));
        }
        assert_eq!(seen.len(), 1);
        assert!(seen[0].is_final());
    }

    #[test]
    fn test_channel_sink() {
        let (mut tx, rx) = mpsc::channel::<Response>();
        tx.notify(sample_fill(Completion::Partial));
        assert_eq!(rx.try_recv().unwrap(), sample_fill(Completion::Partial));
    }

    #[test]
    fn test_channel_sink_ignores_disconnected_receiver() {
        let (mut tx, rx) = mpsc::channel::<Response>();
        drop(rx);
        tx.notify(sample_fill(Completion::Partial));
    }

    #[test]
    fn test_boxed_sink() {
        let (tx, rx) = mpsc::channel::<Response>();
        let mut sink: Box<dyn ResponseSink + Send> = Box::new(tx);
        sink.notify(sample_fill(Completion::Full));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_borrowed_channel_sink() {
        let (mut tx, rx) = mpsc::channel::<Response>();
        deliver(&mut tx, sample_fill(Completion::Partial));
        tx.notify(sample_fill(Completion::Full));

        let received: Vec<Response> = rx.try_iter().collect();
        assert_eq!(received, vec![sample_fill(Completion::Partial), sample_fill(Completion::Full)]);
    }

    #[test]
    fn test_borrowed_dyn_sink() {
        let mut seen = Vec::new();
        {
            let mut closure = |response: Response| seen.push(response);
            let sink: &mut (dyn ResponseSink + Send) = &mut closure;
            deliver(sink, sample_fill(Completion::Full));
        }
        assert_eq!(seen, vec![sample_fill(Completion::Full)]);
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_string(&sample_fill(Completion::Full)).unwrap();
        assert!(json.contains("\"type\":\"FILL\""));
        assert!(json.contains("\"completion\":\"FULL\""));

        let deserialized: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, sample_fill(Completion::Full));
    }
}
