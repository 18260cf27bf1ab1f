//! Write-through response cache backed by gzip files.
//!
//! Each entry lives at `<dir>/<namespace prefix><sanitized key>.gz`.

use std::future::Future;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use super::key::sanitize_key;
use super::outcome::{FetchOutcome, Namespace};
use crate::Error;

const ENTRY_EXTENSION: &str = ".gz";

/// Longest filename, in bytes, common filesystems accept.
const MAX_FILENAME_BYTES: usize = 255;

/// Response cache handle.
///
/// Holds only the cache root; all state lives on disk and is shared by
/// every namespace through disjoint filename prefixes.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Create a cache rooted at `dir`. Nothing is touched on disk until the
    /// first cached lookup.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage path for `key` in `namespace`.
    pub fn entry_path(&self, key: &str, namespace: Namespace) -> PathBuf {
        let filename = format!("{}{}{}", namespace.prefix(), sanitize_key(key), ENTRY_EXTENSION);
        self.dir.join(filename)
    }

    /// Return the cached text for `key`, or run `fetch` and cache its result.
    ///
    /// With `use_cache` unset the cache is neither read nor written. Only
    /// `FetchOutcome::Present` results are stored; absence and failures are
    /// returned as-is and will be fetched again next time. Keys whose entry
    /// filename exceeds the filesystem limit are fetched live and not stored.
    pub async fn cached_fetch<F, Fut>(&self, key: &str, namespace: Namespace, use_cache: bool, fetch: F) -> FetchOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchOutcome>,
    {
        let path = self.entry_path(key, namespace);
        let use_cache = use_cache && fits_filename_limit(&path);

        if use_cache {
            if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
                return FetchOutcome::Failed(Error::Cache(format!(
                    "failed to create cache directory {}: {}",
                    self.dir.display(),
                    e
                )));
            }

            if let Some(text) = read_entry(&path).await {
                tracing::debug!(key, prefix = namespace.prefix(), "cache hit");
                return FetchOutcome::Present(text);
            }

            tracing::debug!(key, prefix = namespace.prefix(), "cache miss");
        }

        let outcome = fetch().await;

        if use_cache && let FetchOutcome::Present(text) = &outcome {
            if let Err(e) = write_entry(&path, text).await {
                return FetchOutcome::Failed(e);
            }
            tracing::debug!(key, path = %path.display(), bytes = text.len(), "cache write");
        }

        outcome
    }
}

fn fits_filename_limit(path: &Path) -> bool {
    let len = path.file_name().map_or(0, |name| name.len());
    if len > MAX_FILENAME_BYTES {
        tracing::warn!(path = %path.display(), bytes = len, "cache filename too long, fetching uncached");
        return false;
    }
    true
}

/// Read and decompress a cache entry. Every failure is a miss.
async fn read_entry(path: &Path) -> Option<String> {
    let compressed = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable cache entry, fetching live");
            return None;
        }
    };

    let mut text = String::new();
    match GzDecoder::new(compressed.as_slice()).read_to_string(&mut text) {
        Ok(_) => Some(text),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt cache entry, fetching live");
            None
        }
    }
}

/// Compress `text` and write it to `path`, replacing any existing entry.
async fn write_entry(path: &Path, text: &str) -> Result<(), Error> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .map_err(|e| Error::Cache(format!("failed to compress entry: {}", e)))?;
    let compressed = encoder
        .finish()
        .map_err(|e| Error::Cache(format!("failed to compress entry: {}", e)))?;

    tokio::fs::write(path, compressed)
        .await
        .map_err(|e| Error::Cache(format!("failed to write {}: {}", path.display(), e)))
}
