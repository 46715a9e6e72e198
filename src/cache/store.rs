//! Backing stores for [`TtlCache`](super::TtlCache).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A cached value with its freshness stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached value, serialized.
    pub value: serde_json::Value,
    /// When the value was stored.
    pub stored_at: DateTime<Utc>,
    /// Seconds the value stays fresh.
    pub ttl_secs: u64,
}

impl CacheEntry {
    /// Returns true once `ttl_secs` have elapsed since `stored_at`.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        (now - self.stored_at).num_seconds() >= self.ttl_secs as i64
    }
}

/// Key-value persistence for cache entries.
pub trait CacheStore: Send + Sync {
    /// Returns the entry for `key`, if any.
    fn load(&self, key: &str) -> Option<CacheEntry>;

    /// Stores or replaces the entry for `key`.
    fn save(&self, key: &str, entry: CacheEntry);

    /// Removes the entry for `key`.
    fn remove(&self, key: &str);

    /// Removes every entry.
    fn clear(&self);
}

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryStore {
    fn load(&self, key: &str) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, entry: CacheEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Store persisted to a single JSON file, rewritten on every change.
///
/// A missing or unreadable file starts the store empty. Write failures are
/// logged and the in-memory copy stays authoritative.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading any existing entries.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Discarding unreadable cache file");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, CacheEntry>) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(error) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), %error, "Failed to create cache directory");
            }
        }
        let result = serde_json::to_vec(entries)
            .map_err(|e| e.to_string())
            .and_then(|bytes| fs::write(&self.path, bytes).map_err(|e| e.to_string()));
        if let Err(error) = result {
            warn!(path = %self.path.display(), %error, "Failed to persist cache");
        }
    }
}

impl CacheStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, entry: CacheEntry) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), entry);
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }

    fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
        self.persist(&entries);
    }
}
