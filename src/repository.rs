//! Read-through orchestration over the cache and a sentiment source.
//!
//! The contract at this boundary:
//!
//! - unless the caller forces a refresh, a fresh cached payload is returned
//!   without consulting the source at all;
//! - every successful source fetch is written back to the cache
//!   unconditionally (even on forced refreshes), with the TTL chosen by
//!   [`FreshnessPolicy`] for that dataset.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::cache::SentimentCache;
use crate::domain::{Dataset, HistoryPoint, SentimentSnapshot};
use crate::freshness::FreshnessPolicy;
use crate::source::{SentimentSource, SourceError};

/// Cached access to a sentiment provider.
pub struct SentimentRepository<S> {
    cache: Arc<SentimentCache>,
    source: S,
    freshness: FreshnessPolicy,
}

impl<S: SentimentSource> SentimentRepository<S> {
    pub fn new(cache: Arc<SentimentCache>, source: S, freshness: FreshnessPolicy) -> Self {
        Self {
            cache,
            source,
            freshness,
        }
    }

    /// Fetch the raw payload for a dataset, serving from the cache when
    /// possible.
    pub async fn fetch(
        &self,
        dataset: &Dataset,
        force_refresh: bool,
    ) -> Result<Bytes, SourceError> {
        let key = dataset.cache_key();

        if !force_refresh {
            if let Some(payload) = self.cache.read(&key) {
                debug!(key, "serving sentiment payload from cache");
                return Ok(payload);
            }
        }

        let payload = self.source.fetch(dataset).await?;
        self.cache
            .write(&key, payload.clone(), self.freshness.ttl_for(dataset));
        debug!(key, size = payload.len(), "fetched sentiment payload from source");
        Ok(payload)
    }

    /// Fetch and decode the current index snapshot.
    pub async fn fetch_current(&self, force_refresh: bool) -> Result<SentimentSnapshot, SourceError> {
        let payload = self.fetch(&Dataset::Current, force_refresh).await?;
        Ok(serde_json::from_slice(&payload)?)
    }

    /// Fetch and decode the daily history for the given window.
    pub async fn fetch_history(
        &self,
        days: u32,
        force_refresh: bool,
    ) -> Result<Vec<HistoryPoint>, SourceError> {
        let payload = self.fetch(&Dataset::History { days }, force_refresh).await?;
        Ok(serde_json::from_slice(&payload)?)
    }
}
