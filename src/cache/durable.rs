//! On-disk cache tier.
//!
//! One file per key inside a directory owned exclusively by this cache
//! instance. Records survive process restarts but not `remove_all`.

use std::fs;
use std::io::{self, ErrorKind, Write as _};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

use super::record::CacheRecord;

/// Errors produced while persisting or deleting durable records.
///
/// These never reach cache callers; the coordinator logs and absorbs them
/// because the fast tier already holds the authoritative copy for the
/// current process lifetime.
#[derive(Debug, Error)]
pub enum DurableTierError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to encode cache record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Filesystem-backed cache tier.
pub struct DurableTier {
    root: PathBuf,
}

impl DurableTier {
    /// Initialise the tier rooted at the provided directory, creating it if
    /// necessary.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, io::Error> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Persist a record for the key, overwriting any prior record.
    ///
    /// The record is written to a temporary file in the same directory and
    /// renamed into place, so a concurrent reader never observes a partial
    /// record.
    pub fn put(&self, key: &str, record: &CacheRecord) -> Result<(), DurableTierError> {
        let encoded = serde_json::to_vec(record)?;

        let mut staged = NamedTempFile::new_in(&self.root)?;
        staged.write_all(&encoded)?;
        staged
            .persist(self.record_path(key))
            .map_err(|persist| persist.error)?;
        Ok(())
    }

    /// Load the record for the key, if a decodable one exists.
    ///
    /// A corrupt or undecodable record is treated as absent and deleted.
    /// No freshness filtering happens here; the coordinator checks expiry.
    pub fn get(&self, key: &str) -> Option<CacheRecord> {
        let path = self.record_path(key);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(key, error = %err, "failed to read durable cache record");
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key, error = %err, "dropping undecodable durable cache record");
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Remove the record for the key. Missing files are treated as success.
    pub fn remove(&self, key: &str) -> Result<(), DurableTierError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DurableTierError::Io(err)),
        }
    }

    /// Remove every record by dropping the whole namespace directory and
    /// recreating it empty.
    pub fn remove_all(&self) -> Result<(), DurableTierError> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(DurableTierError::Io(err)),
        }
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Sum of on-disk record sizes in bytes. Diagnostics only; unreadable
    /// entries are skipped.
    pub fn total_size(&self) -> u64 {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.metadata().ok())
            .filter(|metadata| metadata.is_file())
            .map(|metadata| metadata.len())
            .sum()
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_key(key))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &std::path::Path {
        &self.root
    }
}

/// Map a caller-supplied key onto a filesystem-safe filename.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`, and a leading dot
/// is neutralized, so hostile keys cannot traverse out of the namespace.
/// Distinct keys that differ only in replaced characters may collide; keys
/// are expected to be plain dataset identifiers (see `Dataset::cache_key`).
fn sanitize_key(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() || name.starts_with('.') {
        name.insert(0, '_');
    }
    name
}
