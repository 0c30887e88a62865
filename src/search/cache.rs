//! Bounded LRU cache of ranked results, keyed by the raw query.

use crate::types::MatchResult;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Default number of cached queries.
pub const DEFAULT_CACHE_MAX: usize = 500;

/// Shared, immutable result list handed out on cache hits.
pub type CachedResults = Arc<[MatchResult]>;

/// LRU cache of query results.
///
/// The catalog never changes after startup, so entries only leave the cache
/// through capacity eviction. A capacity of 0 disables caching entirely.
pub struct ResultCache {
    /// `None` when caching is disabled
    entries: Option<Mutex<LruCache<String, CachedResults>>>,
}

impl fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Look up a query, marking it as most recently used.
    pub fn get(&self, query: &str) -> Option<CachedResults> {
        self.lock()?.get(query).cloned()
    }

    /// Store results for a query, evicting the least recently used entry when full.
    pub fn put(&self, query: &str, results: CachedResults) {
        let Some(mut entries) = self.lock() else {
            return;
        };

        if let Some((evicted, _)) = entries.push(query.to_string(), results)
            && evicted != query
        {
            tracing::debug!("Evicted cached results for '{}'", evicted);
        }
    }

    /// Whether the query is cached, without touching its recency.
    pub fn contains(&self, query: &str) -> bool {
        self.lock().is_some_and(|entries| entries.contains(query))
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().map_or(0, |entries| entries.cap().get())
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<String, CachedResults>>> {
        let entries = self.entries.as_ref()?;
        // Entries are immutable once stored
        Some(entries.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Result cache lock was poisoned, recovering");
            poisoned.into_inner()
        }))
    }
}
