//! The unit of cache storage.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// A cached payload with its absolute expiry instant.
///
/// The payload is opaque to the cache. On disk the record is encoded as a
/// self-describing JSON object with the payload in base64 and the expiry as
/// unix seconds, so payload bytes round-trip exactly and the timestamp keeps
/// one-second precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(with = "payload_base64")]
    pub payload: Bytes,
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl CacheRecord {
    /// Build a record expiring `ttl` from now.
    pub fn new(payload: Bytes, ttl: Duration) -> Self {
        Self {
            payload,
            expires_at: OffsetDateTime::now_utc() + ttl,
        }
    }

    /// Build a record with an explicit expiry instant. Used by promotion,
    /// which must not recompute the TTL.
    pub fn with_expiry(payload: Bytes, expires_at: OffsetDateTime) -> Self {
        Self {
            payload,
            expires_at,
        }
    }

    /// Whether the record is stale. Evaluated against the current clock on
    /// every call, never cached.
    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires_at
    }

    /// Payload size in bytes, used for fast-tier byte accounting.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

mod payload_base64 {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(payload: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(payload))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let decoded = STANDARD.decode(encoded).map_err(D::Error::custom)?;
        Ok(Bytes::from(decoded))
    }
}
