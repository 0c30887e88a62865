//! The search engine: query resolution with caching, and exact lookup.
//!
//! One engine is built at startup and passed explicitly to whatever serves
//! requests. The catalog and index are immutable; only the result cache
//! mutates, behind its own lock, so the engine is `Send + Sync`.

use crate::catalog::{Catalog, ItemRecord, load_catalog};
use crate::config::Config;
use crate::error::{IndexError, NotFound};
use crate::search::{
    CachedResults, DEFAULT_CACHE_MAX, DEFAULT_THRESHOLD, FieldWeights, FuzzyIndex, ResultCache,
};
use crate::types::MatchResult;
use anyhow::Context;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Engine construction options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Keep scores on returned matches
    pub include_score: bool,
    /// Result cache capacity; 0 disables caching
    pub cache_capacity: usize,
    /// Highest score still considered a match
    pub threshold: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            include_score: false,
            cache_capacity: DEFAULT_CACHE_MAX,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Counters describing how queries were served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    /// Fuzzy index scans executed
    pub searches: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Queries currently cached
    pub cached_queries: usize,
}

pub struct SearchEngine {
    catalog: Catalog,
    index: FuzzyIndex,
    cache: ResultCache,
    include_score: bool,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("stickers", &self.catalog.len())
            .field("index", &self.index)
            .field("cache", &self.cache)
            .field("include_score", &self.include_score)
            .finish()
    }
}

impl SearchEngine {
    /// Build the index over `catalog` and set up the result cache.
    pub fn new(
        catalog: Catalog,
        weights: &FieldWeights,
        options: EngineOptions,
    ) -> Result<Self, IndexError> {
        let index = FuzzyIndex::build(&catalog, weights)?.with_threshold(options.threshold);

        Ok(Self {
            catalog,
            index,
            cache: ResultCache::new(options.cache_capacity),
            include_score: options.include_score,
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        })
    }

    /// Load the configured sticker-info file and build an engine over it.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let catalog = load_catalog(&config.sticker_info_path, config.delivery_mode())?;
        Self::new(catalog, &config.field_weights(), config.engine_options())
            .context("Failed to build search index")
    }

    /// Ranked matches for an autocomplete query.
    ///
    /// Results are cached under the raw query string only, so a cached list is
    /// returned as-is regardless of `limit`. Use one limit for the lifetime of
    /// an engine.
    pub fn resolve(&self, query: &str, limit: usize) -> CachedResults {
        if let Some(cached) = self.cache.get(query) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Cache hit for '{}'", query);
            return cached;
        }
        self.cache_misses.fetch_add(1, Ordering::Relaxed);

        let start = std::time::Instant::now();
        let mut matches = self.index.search(query, limit);
        if !self.include_score {
            matches = matches.into_iter().map(MatchResult::without_score).collect();
        }
        let results: CachedResults = matches.into();

        tracing::debug!(
            "Resolved '{}' to {} matches in {:?}",
            query,
            results.len(),
            start.elapsed()
        );

        self.cache.put(query, CachedResults::clone(&results));
        results
    }

    /// Exact lookup of a committed sticker key.
    pub fn resolve_key(&self, key: &str) -> Result<&ItemRecord, NotFound> {
        self.catalog.get(key)
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn index(&self) -> &FuzzyIndex {
        &self.index
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            searches: self.index.search_count(),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cached_queries: self.cache.len(),
        }
    }
}
