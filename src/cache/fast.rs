//! In-memory cache tier.

use lru::LruCache;
use metrics::counter;

use crate::config::CacheConfig;

use super::record::CacheRecord;
use super::telemetry::METRIC_FAST_EVICT;

/// Bounded in-memory map from key to record.
///
/// Capacity is limited by entry count (strict, enforced by the LRU map) and
/// by total payload bytes (soft: exceeding the budget sheds least-recently
/// used entries until back under it, but a single oversized record is kept).
/// No guarantee is made about which entry survives capacity pressure.
pub struct FastTier {
    entries: LruCache<String, CacheRecord>,
    total_bytes: usize,
    byte_limit: usize,
}

impl FastTier {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: LruCache::new(config.entry_limit_non_zero()),
            total_bytes: 0,
            byte_limit: config.byte_limit,
        }
    }

    /// Insert or overwrite a record, evicting older entries if over budget.
    pub fn put(&mut self, key: String, record: CacheRecord) {
        self.total_bytes += record.payload_len();

        if let Some((displaced_key, displaced)) = self.entries.push(key.clone(), record) {
            self.total_bytes = self.total_bytes.saturating_sub(displaced.payload_len());
            if displaced_key != key {
                counter!(METRIC_FAST_EVICT).increment(1);
            }
        }

        while self.total_bytes > self.byte_limit && self.entries.len() > 1 {
            match self.entries.pop_lru() {
                Some((_, dropped)) => {
                    self.total_bytes = self.total_bytes.saturating_sub(dropped.payload_len());
                    counter!(METRIC_FAST_EVICT).increment(1);
                }
                None => break,
            }
        }
    }

    /// Look up a record, marking it as recently used.
    pub fn get(&mut self, key: &str) -> Option<&CacheRecord> {
        self.entries.get(key)
    }

    /// Look up a record without touching recency. Used by freshness probes.
    pub fn peek(&self, key: &str) -> Option<&CacheRecord> {
        self.entries.peek(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<CacheRecord> {
        let removed = self.entries.pop(key);
        if let Some(record) = &removed {
            self.total_bytes = self.total_bytes.saturating_sub(record.payload_len());
        }
        removed
    }

    pub fn remove_all(&mut self) {
        self.entries.clear();
        self.total_bytes = 0;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current payload byte total across all entries.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }
}
