//! Fuzzy search over the sticker catalog.
//!
//! This module provides similarity scoring, the weighted multi-field index,
//! and the LRU cache of ranked results.

pub mod cache;
pub mod index;
pub mod scoring;

pub use cache::{CachedResults, DEFAULT_CACHE_MAX, ResultCache};
pub use index::{DEFAULT_THRESHOLD, FieldWeight, FieldWeights, FuzzyIndex};
