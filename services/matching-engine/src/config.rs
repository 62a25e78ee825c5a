//! Matcher configuration

use serde::{Deserialize, Serialize};

/// What to do when an incoming order would execute against a resting
/// order from the same trader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfTradePolicy {
    /// Match regardless of trader identity
    #[default]
    Allow,
    /// Cancel the resting order and keep matching past it
    CancelResting,
}

/// Configuration for a single-instrument matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Self-trade handling; identity-blind unless set.
    pub self_trade_policy: SelfTradePolicy,
    /// Initial queue capacity of each new price level.
    pub level_capacity: usize,
    /// First match id handed out by the executor.
    pub starting_match_id: u64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            self_trade_policy: SelfTradePolicy::Allow,
            level_capacity: 4,
            starting_match_id: 1,
        }
    }
}
