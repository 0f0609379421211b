//! Sentix — cached access to a market sentiment index.
//!
//! The crate is organised around a two-tier expiring cache:
//!
//! - **[`cache::FastTier`]**: bounded in-memory map (entry and byte limits)
//! - **[`cache::DurableTier`]**: one file per key on local disk, surviving
//!   process restarts
//! - **[`SentimentCache`]**: owns both tiers and implements the
//!   read-through, promotion, and lazy-expiry policy
//!
//! Writes land in both tiers. Reads try the fast tier first; a fresh record
//! found only on disk is promoted back into memory before being returned,
//! so repeated reads of a cold key pay the disk cost once.
//!
//! On top of the cache, [`SentimentRepository`] implements the fetch
//! orchestration contract: consult the cache unless the caller forces a
//! refresh, and write every successful provider response back with a TTL
//! chosen by [`FreshnessPolicy`].
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use sentix::{CacheConfig, SentimentCache};
//! use time::Duration;
//!
//! let cache = SentimentCache::new(&CacheConfig::default(), "/var/cache/sentix")?;
//! cache.write("sentiment_current", Bytes::from_static(b"{\"score\":46}"), Duration::minutes(5));
//! assert!(cache.read("sentiment_current").is_some());
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod cache;
pub mod config;
pub mod domain;
pub mod freshness;
pub mod repository;
pub mod source;
pub mod util;

pub use cache::{CacheStats, SentimentCache};
pub use config::CacheConfig;
pub use domain::{Dataset, HistoryPoint, Rating, SentimentSnapshot};
pub use freshness::FreshnessPolicy;
pub use repository::SentimentRepository;
pub use source::{SentimentSource, SourceError};
