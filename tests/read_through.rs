//! Read-through contract tests: the repository consults the cache before
//! the source and writes every successful fetch back.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use sentix::{
    CacheConfig, Dataset, FreshnessPolicy, Rating, SentimentCache, SentimentRepository,
    SentimentSource, SourceError,
};
use serde_json::json;
use time::OffsetDateTime;

/// Source double that serves deterministic JSON and counts fetches.
struct CountingSource {
    fetches: AtomicUsize,
    score: f64,
}

impl CountingSource {
    fn new(score: f64) -> Self {
        Self {
            fetches: AtomicUsize::new(0),
            score,
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentSource for CountingSource {
    async fn fetch(&self, dataset: &Dataset) -> Result<Bytes, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let body = match dataset {
            Dataset::Current => json!({
                "score": self.score,
                "rating": Rating::from_score(self.score).as_str(),
                "timestamp": now,
                "previous_close": 52.1,
                "previous_week": 44.0,
                "previous_month": 38.1,
                "previous_year": 34.3,
            }),
            Dataset::History { days } => json!(
                (0..*days)
                    .map(|offset| json!({
                        "timestamp": now - i64::from(offset) * 86_400,
                        "score": self.score,
                        "rating": Rating::from_score(self.score).as_str(),
                    }))
                    .collect::<Vec<_>>()
            ),
            Dataset::Bulk { limit } => json!({ "limit": limit, "data": [] }),
        };

        Ok(Bytes::from(serde_json::to_vec(&body).expect("encode fixture")))
    }
}

fn repository(
    dir: &tempfile::TempDir,
    source: Arc<CountingSource>,
) -> SentimentRepository<Arc<CountingSource>> {
    let cache = SentimentCache::new(&CacheConfig::default(), dir.path().join("sentix-cache"))
        .expect("cache should open");
    SentimentRepository::new(Arc::new(cache), source, FreshnessPolicy::default())
}

#[tokio::test]
async fn second_fetch_is_served_from_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(CountingSource::new(46.6));
    let repo = repository(&dir, source.clone());

    let first = repo.fetch(&Dataset::Current, false).await.expect("fetch");
    assert_eq!(source.fetch_count(), 1);

    let second = repo.fetch(&Dataset::Current, false).await.expect("fetch");
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn force_refresh_bypasses_the_cache_but_still_writes_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(CountingSource::new(46.6));
    let repo = repository(&dir, source.clone());

    repo.fetch(&Dataset::Current, false).await.expect("fetch");
    repo.fetch(&Dataset::Current, true).await.expect("forced fetch");
    assert_eq!(source.fetch_count(), 2);

    // The forced response was written back, so a non-forced fetch stays local.
    repo.fetch(&Dataset::Current, false).await.expect("fetch");
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn datasets_are_cached_independently() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(CountingSource::new(46.6));
    let repo = repository(&dir, source.clone());

    repo.fetch(&Dataset::History { days: 30 }, false)
        .await
        .expect("fetch");
    repo.fetch(&Dataset::History { days: 365 }, false)
        .await
        .expect("fetch");
    assert_eq!(source.fetch_count(), 2);

    repo.fetch(&Dataset::History { days: 30 }, false)
        .await
        .expect("fetch");
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn typed_helpers_decode_cached_payloads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(CountingSource::new(46.6));
    let repo = repository(&dir, source.clone());

    let snapshot = repo.fetch_current(false).await.expect("snapshot");
    assert_eq!(snapshot.rating, Rating::Neutral);
    assert!((snapshot.score - 46.6).abs() < f64::EPSILON);

    let history = repo.fetch_history(7, false).await.expect("history");
    assert_eq!(history.len(), 7);
    assert_eq!(history[0].rating, Rating::Neutral);

    // One fetch per dataset; the snapshot decode reused the cached bytes.
    assert_eq!(source.fetch_count(), 2);
}
