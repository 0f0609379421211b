//! Freshness policy: how long each dataset stays authoritative.
//!
//! A pure configuration table consulted by collaborators when choosing the
//! TTL passed to [`SentimentCache::write`](crate::SentimentCache::write).
//! The cache itself never reads this table.

use time::Duration;

use crate::domain::Dataset;

/// TTL table keyed by data volatility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshnessPolicy {
    /// Live index value; changes throughout the trading day.
    pub current: Duration,
    /// Short daily history.
    pub history: Duration,
    /// Bulk exports; effectively static within the hour.
    pub bulk: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            current: Duration::minutes(5),
            history: Duration::minutes(15),
            bulk: Duration::hours(1),
        }
    }
}

impl FreshnessPolicy {
    /// TTL for a dataset.
    pub fn ttl_for(&self, dataset: &Dataset) -> Duration {
        match dataset {
            Dataset::Current => self.current,
            Dataset::History { .. } => self.history,
            Dataset::Bulk { .. } => self.bulk,
        }
    }
}
