//! Domain types for the sentiment index.
//!
//! Defines the index snapshot and history entities plus [`Dataset`], which
//! derives the deterministic cache keys collaborators use at the cache
//! boundary.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Qualitative band for a sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "extreme fear")]
    ExtremeFear,
    #[serde(rename = "fear")]
    Fear,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "greed")]
    Greed,
    #[serde(rename = "extreme greed")]
    ExtremeGreed,
}

impl Rating {
    /// Classify a 0–100 score into its band.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 25.0 => Self::ExtremeFear,
            s if s < 45.0 => Self::Fear,
            s if s < 55.0 => Self::Neutral,
            s if s < 75.0 => Self::Greed,
            _ => Self::ExtremeGreed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtremeFear => "extreme fear",
            Self::Fear => "fear",
            Self::Neutral => "neutral",
            Self::Greed => "greed",
            Self::ExtremeGreed => "extreme greed",
        }
    }
}

/// Current state of the sentiment index, including reference values from
/// earlier close points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub score: f64,
    pub rating: Rating,
    #[serde(with = "time::serde::timestamp")]
    pub timestamp: OffsetDateTime,
    pub previous_close: f64,
    pub previous_week: f64,
    pub previous_month: f64,
    pub previous_year: f64,
}

/// One historical observation of the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(with = "time::serde::timestamp")]
    pub timestamp: OffsetDateTime,
    pub score: f64,
    pub rating: Rating,
}

/// Logical dataset served by the sentiment provider.
///
/// Each variant maps to exactly one cache key, so distinct
/// parameterizations never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// The live index value.
    Current,
    /// Daily history covering the given number of days.
    History { days: u32 },
    /// Bulk export capped at `limit` entries (0 = everything).
    Bulk { limit: u32 },
}

impl Dataset {
    /// Deterministic cache key for this dataset.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Current => "sentiment_current".to_string(),
            Self::History { days } => format!("sentiment_history_{days}d"),
            Self::Bulk { limit } => format!("sentiment_bulk_{limit}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bands() {
        assert_eq!(Rating::from_score(0.0), Rating::ExtremeFear);
        assert_eq!(Rating::from_score(24.9), Rating::ExtremeFear);
        assert_eq!(Rating::from_score(25.0), Rating::Fear);
        assert_eq!(Rating::from_score(46.6), Rating::Neutral);
        assert_eq!(Rating::from_score(55.0), Rating::Greed);
        assert_eq!(Rating::from_score(75.0), Rating::ExtremeGreed);
        assert_eq!(Rating::from_score(100.0), Rating::ExtremeGreed);
    }

    #[test]
    fn rating_serde_uses_provider_labels() {
        let json = serde_json::to_string(&Rating::ExtremeFear).expect("serialize");
        assert_eq!(json, r#""extreme fear""#);

        let rating: Rating = serde_json::from_str(r#""neutral""#).expect("deserialize");
        assert_eq!(rating, Rating::Neutral);
    }

    #[test]
    fn dataset_keys_are_distinct() {
        assert_eq!(Dataset::Current.cache_key(), "sentiment_current");
        assert_eq!(
            Dataset::History { days: 365 }.cache_key(),
            "sentiment_history_365d"
        );
        assert_ne!(
            Dataset::History { days: 30 }.cache_key(),
            Dataset::History { days: 365 }.cache_key()
        );
        assert_ne!(
            Dataset::Bulk { limit: 0 }.cache_key(),
            Dataset::Bulk { limit: 30 }.cache_key()
        );
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let snapshot = SentimentSnapshot {
            score: 46.6,
            rating: Rating::Neutral,
            timestamp: OffsetDateTime::from_unix_timestamp(1_736_380_800).expect("timestamp"),
            previous_close: 52.1,
            previous_week: 44.0,
            previous_month: 38.1,
            previous_year: 34.3,
        };

        let json = serde_json::to_vec(&snapshot).expect("serialize");
        let decoded: SentimentSnapshot = serde_json::from_slice(&json).expect("deserialize");
        assert_eq!(decoded, snapshot);
    }
}
