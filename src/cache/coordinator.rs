//! Cache coordinator: read-through, promotion, and lazy expiry.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use bytes::Bytes;
use metrics::counter;
use time::Duration;
use tracing::{debug, warn};

use crate::config::CacheConfig;

use super::durable::DurableTier;
use super::fast::FastTier;
use super::lock::mutex_lock;
use super::record::CacheRecord;
use super::telemetry::{METRIC_DURABLE_HIT, METRIC_FAST_HIT, METRIC_MISS, describe_metrics};

const SOURCE: &str = "cache::coordinator";

/// Diagnostic snapshot of cache occupancy.
///
/// Counts are taken without freshness filtering, so expired-but-unreaped
/// records are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of records currently held in the fast tier.
    pub fast_entries: usize,
    /// Total on-disk size of the durable tier in bytes.
    pub durable_bytes: u64,
}

/// Two-tier cache for sentiment index payloads.
///
/// All operations are serialized behind one lock, so a read never observes
/// a half-completed write and `clear_all` is linearizable against
/// concurrent writes. No operation returns an error: durable-tier failures
/// are logged and absorbed, and anything miss-like is `None`.
pub struct SentimentCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    fast: FastTier,
    durable: DurableTier,
}

impl SentimentCache {
    /// Open a cache over the given storage directory, creating it if
    /// necessary. The directory must be owned exclusively by this instance.
    pub fn new(config: &CacheConfig, root: impl Into<PathBuf>) -> Result<Self, io::Error> {
        describe_metrics();
        Ok(Self {
            inner: Mutex::new(CacheInner {
                fast: FastTier::new(config),
                durable: DurableTier::new(root)?,
            }),
        })
    }

    /// Store a payload under the key in both tiers, expiring `ttl` from now.
    ///
    /// Durable-tier write failures are absorbed: the fast tier already holds
    /// the authoritative copy for this process lifetime.
    pub fn write(&self, key: &str, payload: Bytes, ttl: Duration) {
        let record = CacheRecord::new(payload, ttl);
        let size = record.payload_len();

        let mut inner = mutex_lock(&self.inner, SOURCE, "write");
        inner.fast.put(key.to_string(), record.clone());
        if let Err(err) = inner.durable.put(key, &record) {
            warn!(key, error = %err, "durable cache write failed; record kept in memory only");
        }
        drop(inner);

        debug!(key, size, ttl_s = ttl.whole_seconds(), "cache write");
    }

    /// Fetch the payload for the key, or `None` when no fresh record exists
    /// in either tier.
    ///
    /// A fresh record found only on disk is promoted back into the fast
    /// tier (keeping its original expiry) before being returned. Expired
    /// records are reaped from whichever tier the lookup finds them in.
    pub fn read(&self, key: &str) -> Option<Bytes> {
        let mut inner = mutex_lock(&self.inner, SOURCE, "read");

        let cached = inner
            .fast
            .get(key)
            .map(|record| (record.payload.clone(), record.is_expired()));
        match cached {
            Some((payload, false)) => {
                counter!(METRIC_FAST_HIT).increment(1);
                debug!(key, tier = "fast", "cache hit");
                return Some(payload);
            }
            Some((_, true)) => {
                // Lazy expiry: drop the stale entry and fall through to disk.
                inner.fast.remove(key);
            }
            None => {}
        }

        match inner.durable.get(key) {
            Some(record) if !record.is_expired() => {
                inner.fast.put(key.to_string(), record.clone());
                counter!(METRIC_DURABLE_HIT).increment(1);
                debug!(key, tier = "durable", "cache hit (promoted)");
                Some(record.payload)
            }
            Some(_) => {
                if let Err(err) = inner.durable.remove(key) {
                    warn!(key, error = %err, "failed to reap expired durable record");
                }
                counter!(METRIC_MISS).increment(1);
                debug!(key, "cache miss (expired)");
                None
            }
            None => {
                counter!(METRIC_MISS).increment(1);
                debug!(key, "cache miss");
                None
            }
        }
    }

    /// Whether a fresh record exists for the key in either tier.
    ///
    /// Same lookup order as [`read`](Self::read) but with no promotion and
    /// no payload handed out; useful to decide whether a refetch is needed.
    pub fn is_valid(&self, key: &str) -> bool {
        let inner = mutex_lock(&self.inner, SOURCE, "is_valid");

        if let Some(record) = inner.fast.peek(key) {
            if !record.is_expired() {
                return true;
            }
        }

        inner
            .durable
            .get(key)
            .is_some_and(|record| !record.is_expired())
    }

    /// Remove the key's record from both tiers. Absent keys are not an
    /// error.
    pub fn clear(&self, key: &str) {
        let mut inner = mutex_lock(&self.inner, SOURCE, "clear");
        inner.fast.remove(key);
        if let Err(err) = inner.durable.remove(key) {
            warn!(key, error = %err, "durable cache delete failed");
        }
        drop(inner);

        debug!(key, "cache cleared");
    }

    /// Remove every record from both tiers.
    pub fn clear_all(&self) {
        let mut inner = mutex_lock(&self.inner, SOURCE, "clear_all");
        inner.fast.remove_all();
        if let Err(err) = inner.durable.remove_all() {
            warn!(error = %err, "durable cache clear failed");
        }
        drop(inner);

        debug!("cache fully cleared");
    }

    /// Occupancy snapshot for diagnostics.
    pub fn stats(&self) -> CacheStats {
        let inner = mutex_lock(&self.inner, SOURCE, "stats");
        let stats = CacheStats {
            fast_entries: inner.fast.len(),
            durable_bytes: inner.durable.total_size(),
        };
        drop(inner);

        debug!(
            fast_entries = stats.fast_entries,
            durable = %crate::util::format_bytes(stats.durable_bytes),
            "cache stats"
        );
        stats
    }
}
