//! Cache configuration.
//!
//! Controls the fast-tier capacity limits. Both limits are soft: a write
//! that pushes the tier over budget evicts older entries to make room, but
//! no specific entry is guaranteed to survive.

use std::num::NonZeroUsize;

use serde::Deserialize;

// Default values mirror the capacity of the original cache backend.
const DEFAULT_ENTRY_LIMIT: usize = 50;
const DEFAULT_BYTE_LIMIT: usize = 10 * 1024 * 1024;

/// Fast-tier capacity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of records held in memory.
    pub entry_limit: usize,
    /// Approximate ceiling on total in-memory payload bytes.
    pub byte_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_limit: DEFAULT_ENTRY_LIMIT,
            byte_limit: DEFAULT_BYTE_LIMIT,
        }
    }
}

impl CacheConfig {
    /// Returns the entry limit as NonZeroUsize, clamping to 1 if zero.
    pub fn entry_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.entry_limit).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert_eq!(config.entry_limit, 50);
        assert_eq!(config.byte_limit, 10 * 1024 * 1024);
    }

    #[test]
    fn non_zero_clamps_to_min() {
        let config = CacheConfig {
            entry_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.entry_limit_non_zero().get(), 1);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: CacheConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.entry_limit, 50);

        let config: CacheConfig =
            serde_json::from_str(r#"{"entry_limit": 8}"#).expect("partial config");
        assert_eq!(config.entry_limit, 8);
        assert_eq!(config.byte_limit, 10 * 1024 * 1024);
    }
}
