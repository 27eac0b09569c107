use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while saving or loading the rate cache file.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the cache file failed.
    #[error("rate cache I/O failed for {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path:   PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The cache file did not contain valid rate JSON.
    #[error("rate cache file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The cache file is older than the cache's TTL.
    #[error("cached rates from {timestamp} are older than the {ttl_secs}s TTL")]
    Expired {
        /// When the file's rates were fetched.
        timestamp: DateTime<Utc>,
        /// The TTL the file was checked against.
        ttl_secs:  u64,
    },
    /// The file's timestamp is not a representable date.
    #[error("rate cache timestamp {0} is out of range")]
    InvalidTimestamp(i64),
    /// No cache directory is configured and none could be derived from the
    /// environment.
    #[error("no cache directory could be determined")]
    NoCacheDir,
}

impl CacheError {
    /// Returns `true` when there is simply no cache file to read yet, as
    /// opposed to a file that is stale or broken.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::NoCacheDir => true,
            _ => false,
        }
    }
}

/// Error reported by a rate provider that could not deliver a category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider} failed to fetch {category} rates: {message}")]
pub struct FetchError {
    /// Name of the provider.
    pub provider: String,
    /// The category that failed.
    pub category: String,
    /// Why it failed.
    pub message:  String,
}
