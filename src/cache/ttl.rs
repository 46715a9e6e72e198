//! Read-through TTL cache with background refresh.

use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::store::{CacheEntry, CacheStore};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached value and whether it has outlived its TTL.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup<V> {
    /// The cached value.
    pub value: V,
    /// True once the TTL has elapsed.
    pub is_stale: bool,
    /// When the value was stored.
    pub stored_at: DateTime<Utc>,
}

/// TTL cache over a [`CacheStore`].
///
/// One policy applies to every key: a fresh hit is returned as is, a stale
/// hit is returned immediately while a single background task refreshes it,
/// and a miss is fetched, stored and returned.
#[derive(Clone)]
pub struct TtlCache {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    refreshing: Arc<Mutex<HashSet<String>>>,
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache").finish_non_exhaustive()
    }
}

impl TtlCache {
    /// Creates a cache on the wall clock.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock.
    pub fn with_clock(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            refreshing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Looks up `key`.
    ///
    /// An entry that no longer decodes as `V` is dropped and reported as a miss.
    pub fn get<V: DeserializeOwned>(&self, key: &str) -> Option<CacheLookup<V>> {
        let entry = self.store.load(key)?;
        match serde_json::from_value::<V>(entry.value.clone()) {
            Ok(value) => Some(CacheLookup {
                value,
                is_stale: entry.is_stale(self.clock.now()),
                stored_at: entry.stored_at,
            }),
            Err(e) => {
                warn!(key, error = %e, "Dropping undecodable cache entry");
                self.store.remove(key);
                None
            }
        }
    }

    /// Stores `value` under `key` for `ttl`.
    pub fn put<V: Serialize>(&self, key: &str, value: &V, ttl: Duration) {
        match serde_json::to_value(value) {
            Ok(value) => self.store.save(
                key,
                CacheEntry {
                    value,
                    stored_at: self.clock.now(),
                    ttl_secs: ttl.as_secs(),
                },
            ),
            Err(e) => warn!(key, error = %e, "Value could not be cached"),
        }
    }

    /// Drops `key`.
    pub fn invalidate(&self, key: &str) {
        self.store.remove(key);
    }

    /// Returns true while a background refresh of `key` is running.
    pub fn is_refreshing(&self, key: &str) -> bool {
        self.refreshing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Returns the cached value for `key`, fetching on a miss and refreshing
    /// in the background when stale.
    ///
    /// Only a miss waits on `fetch`; its error is returned and nothing is
    /// cached. Background refresh failures are logged and the stale value
    /// is kept.
    pub async fn read_through<V, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<CacheLookup<V>, E>
    where
        V: Serialize + DeserializeOwned + Send + 'static,
        E: Display + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        match self.get::<V>(key) {
            Some(hit) if !hit.is_stale => Ok(hit),
            Some(stale) => {
                if self.begin_refresh(key) {
                    self.spawn_refresh(key.to_string(), ttl, fetch());
                } else {
                    debug!(key, "Refresh already in flight");
                }
                Ok(stale)
            }
            None => {
                let value = fetch().await?;
                self.put(key, &value, ttl);
                Ok(CacheLookup {
                    value,
                    is_stale: false,
                    stored_at: self.clock.now(),
                })
            }
        }
    }

    fn begin_refresh(&self, key: &str) -> bool {
        self.refreshing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string())
    }

    fn spawn_refresh<V, E, Fut>(&self, key: String, ttl: Duration, fetch: Fut)
    where
        V: Serialize + Send + 'static,
        E: Display + Send + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let cache = self.clone();
        let guard = RefreshGuard {
            refreshing: Arc::clone(&self.refreshing),
            key: key.clone(),
        };
        tokio::spawn(async move {
            let _guard = guard;
            match fetch.await {
                Ok(value) => {
                    cache.put(&key, &value, ttl);
                    debug!(key = %key, "Cache entry refreshed");
                }
                Err(e) => warn!(key = %key, error = %e, "Background cache refresh failed"),
            }
        });
    }
}

/// Releases a key's refresh slot when the refresh task ends, however it ends.
struct RefreshGuard {
    refreshing: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.refreshing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
