//! Weighted multi-field fuzzy index over the catalog.

use crate::catalog::{Catalog, PRIMARY_FIELD};
use crate::error::IndexError;
use crate::types::MatchResult;
use serde::Deserialize;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::scoring::{FieldScore, field_similarity, record_score};

/// Default cutoff: records scoring above this are not returned.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// A searchable field and its importance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldWeight {
    pub name: String,
    pub weight: f64,
}

impl FieldWeight {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// The primary field weight plus any weighted metadata fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWeights {
    primary: f64,
    metadata: Vec<FieldWeight>,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FieldWeights {
    /// Weight only the primary `text` field.
    pub const fn new(primary_weight: f64) -> Self {
        Self {
            primary: primary_weight,
            metadata: Vec::new(),
        }
    }

    /// Add a weighted metadata field, e.g. `metadata.tags`.
    pub fn with_field(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.metadata.push(FieldWeight::new(name, weight));
        self
    }

    /// Add several metadata fields at once.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldWeight>) -> Self {
        self.metadata.extend(fields);
        self
    }

    /// All fields, primary first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        std::iter::once((PRIMARY_FIELD, self.primary))
            .chain(self.metadata.iter().map(|f| (f.name.as_str(), f.weight)))
    }

    pub(crate) fn validate(&self) -> Result<(), IndexError> {
        for (name, weight) in self.iter() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(IndexError::InvalidWeight {
                    field: name.to_string(),
                    weight,
                });
            }
        }
        Ok(())
    }
}

/// Case-folded values of one record, grouped by weighted field.
struct IndexedRecord {
    key: String,
    display_text: String,
    /// `fields[slot]` holds every value of the slot's field; empty when absent
    fields: Vec<Vec<Vec<char>>>,
}

/// Fuzzy index built once over an immutable catalog.
///
/// Searches are read-only and can run concurrently without locking.
pub struct FuzzyIndex {
    records: Vec<IndexedRecord>,
    weights: Vec<f64>,
    threshold: f64,
    /// Number of `search` calls, for observing cache effectiveness
    searches: AtomicUsize,
}

impl fmt::Debug for FuzzyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyIndex")
            .field("records", &self.records.len())
            .field("weights", &self.weights)
            .field("threshold", &self.threshold)
            .field("searches", &self.search_count())
            .finish()
    }
}

impl FuzzyIndex {
    /// Builds the index, lowercasing every weighted field value up front.
    pub fn build(catalog: &Catalog, weights: &FieldWeights) -> Result<Self, IndexError> {
        weights.validate()?;

        let start = std::time::Instant::now();
        let names: Vec<&str> = weights.iter().map(|(name, _)| name).collect();

        let records: Vec<IndexedRecord> = catalog
            .iter()
            .map(|record| IndexedRecord {
                key: record.key.clone(),
                display_text: record.text.clone(),
                fields: names
                    .iter()
                    .map(|name| record.values(name).map(fold_case).collect())
                    .collect(),
            })
            .collect();

        let value_count: usize = records
            .iter()
            .flat_map(|r| r.fields.iter())
            .map(Vec::len)
            .sum();

        tracing::info!(
            "Built fuzzy index: {} records, {} weighted fields, {} values in {:?}",
            records.len(),
            names.len(),
            value_count,
            start.elapsed()
        );

        Ok(Self {
            records,
            weights: weights.iter().map(|(_, weight)| weight).collect(),
            threshold: DEFAULT_THRESHOLD,
            searches: AtomicUsize::new(0),
        })
    }

    /// Set the score cutoff, clamped to `[0, 1]`. A threshold of 1 keeps every record.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Returns at most `limit` matches sorted best first.
    ///
    /// Equal scores keep catalog order. An empty query matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<MatchResult> {
        self.searches.fetch_add(1, Ordering::Relaxed);

        if query.is_empty() || limit == 0 || self.records.is_empty() {
            return vec![];
        }

        let query = fold_case(query);
        let mut scored: Vec<(usize, f64)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let score = self.score(&query, record);
                (score <= self.threshold).then_some((position, score))
            })
            .collect();

        // Stable sort: ties stay in catalog order
        scored.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(position, score)| {
                let record = &self.records[position];
                MatchResult {
                    key: record.key.clone(),
                    display_text: record.display_text.clone(),
                    score: Some(score),
                }
            })
            .collect()
    }

    /// Scores one record; an exact primary match is always 0.
    fn score(&self, query: &[char], record: &IndexedRecord) -> f64 {
        let mut scores = Vec::with_capacity(self.weights.len());

        for (slot, values) in record.fields.iter().enumerate() {
            // Fields a record does not have are skipped, not scored as mismatches
            if values.is_empty() {
                continue;
            }

            let similarity = values
                .iter()
                .map(|value| field_similarity(query, value))
                .fold(0.0, f64::max);

            if slot == 0 && similarity >= 1.0 {
                return 0.0;
            }

            scores.push(FieldScore {
                similarity,
                weight: self.weights[slot],
            });
        }

        record_score(&scores)
    }

    /// Number of times `search` has been called.
    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::Relaxed)
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn fold_case(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}
