//! Provider boundary for sentiment data.
//!
//! The cache never talks to the network. Anything that can produce raw
//! payload bytes for a [`Dataset`] — an HTTP client, a fixture, a test
//! double — implements [`SentimentSource`] and is driven by
//! [`SentimentRepository`](crate::SentimentRepository).

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::Dataset;

/// Errors at the provider boundary. Cache operations never produce these.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("sentiment provider request failed: {0}")]
    Provider(String),
    #[error("sentiment payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }
}

/// A producer of raw sentiment payloads.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Fetch the raw payload bytes for a dataset.
    async fn fetch(&self, dataset: &Dataset) -> Result<Bytes, SourceError>;
}

// A shared source works anywhere an owned one does.
#[async_trait]
impl<S: SentimentSource + ?Sized> SentimentSource for Arc<S> {
    async fn fetch(&self, dataset: &Dataset) -> Result<Bytes, SourceError> {
        (**self).fetch(dataset).await
    }
}
