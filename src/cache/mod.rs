//! Two-tier expiring cache.
//!
//! - **FastTier**: bounded in-memory LRU map of records.
//! - **DurableTier**: one file per key on local disk; survives restarts.
//! - **[`SentimentCache`]**: owns both tiers and implements read-through
//!   with promotion and lazy expiry.
//!
//! Records carry an absolute expiry instant; freshness is evaluated at read
//! time in whichever tier the record is found, because the tiers are allowed
//! to diverge (the fast tier can lose entries to capacity pressure without
//! the durable tier knowing).
//!
//! Cache operations never fail from the caller's perspective: durable I/O
//! errors are logged and absorbed, and every miss-like condition is `None`.

mod coordinator;
mod durable;
mod fast;
mod lock;
mod record;
mod telemetry;

pub use coordinator::{CacheStats, SentimentCache};
pub use durable::{DurableTier, DurableTierError};
pub use fast::FastTier;
pub use record::CacheRecord;
