//! Process-wide content hash cache
//!
//! Maps an absolute file path to a truncated SHA-256 hex digest of the file's
//! bytes. Entries are computed on first request and then kept for the life of
//! the cache: there is no invalidation, refresh, or size bound. Hosts that
//! rebuild in a long-running process should create a fresh cache per build.

use cachebust_config::MAX_HASH_LENGTH;
use cachebust_foundation::{BustError, BustResult, ContentSource};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Truncated lowercase hex SHA-256 of `content`
pub fn content_hash(content: &[u8], length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(length);
    hex
}

pub struct ContentHashCache {
    entries: DashMap<PathBuf, String>,
    source: Arc<dyn ContentSource>,
    hash_length: usize,
}

impl ContentHashCache {
    /// Empty cache keeping `hash_length` hex characters per digest.
    ///
    /// Fails unless `hash_length` is within `1..=MAX_HASH_LENGTH`.
    pub fn new(source: Arc<dyn ContentSource>, hash_length: usize) -> BustResult<Self> {
        if hash_length == 0 || hash_length > MAX_HASH_LENGTH {
            return Err(BustError::config(format!(
                "Invalid hashLength {}, must be between 1 and {}",
                hash_length, MAX_HASH_LENGTH
            )));
        }

        Ok(Self {
            entries: DashMap::new(),
            source,
            hash_length,
        })
    }

    /// Hash of the file at `path`, reading it only on the first request.
    ///
    /// The shard write lock is held while the file is read, so concurrent
    /// callers asking for the same path wait for the first one instead of
    /// hashing the file again. Lookups of other paths that land in the same
    /// shard wait on that read too. A failed read stores nothing.
    pub fn hash_of(&self, path: &Path) -> BustResult<String> {
        if let Some(hash) = self.entries.get(path) {
            trace!(path = %path.display(), hash = %hash.value(), "Content hash cache hit");
            return Ok(hash.value().clone());
        }

        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let content = self
                    .source
                    .read(path)
                    .map_err(|e| BustError::file_access(path, e))?;
                let hash = content_hash(&content, self.hash_length);

                debug!(
                    path = %path.display(),
                    bytes = content.len(),
                    hash = %hash,
                    "Hashed import target"
                );

                entry.insert(hash.clone());
                Ok(hash)
            }
        }
    }

    pub fn hash_length(&self) -> usize {
        self.hash_length
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ContentHashCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentHashCache")
            .field("entries", &self.entries.len())
            .field("hash_length", &self.hash_length)
            .finish()
    }
}
