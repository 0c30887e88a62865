//! Immutable key -> record table.

use crate::catalog::record::ItemRecord;
use crate::error::{CatalogError, NotFound};
use ahash::AHashMap;

/// The full set of stickers, loaded once at startup.
///
/// Records keep their insertion order, which is also the tie-break order for
/// equally scored search results.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ItemRecord>,
    by_key: AHashMap<String, usize>,
}

impl Catalog {
    /// Validate and index the given records.
    ///
    /// Fails on duplicate or empty keys and on empty resource references.
    pub fn load(records: Vec<ItemRecord>) -> Result<Self, CatalogError> {
        let mut by_key = AHashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if record.key.is_empty() {
                return Err(CatalogError::EmptyKey { index });
            }

            if record.resource.target().trim().is_empty() {
                return Err(CatalogError::EmptyResource {
                    key: record.key.clone(),
                });
            }

            if let Some(first) = by_key.insert(record.key.clone(), index) {
                return Err(CatalogError::DuplicateKey {
                    key: record.key.clone(),
                    first,
                    second: index,
                });
            }
        }

        tracing::debug!("Loaded catalog with {} stickers", records.len());
        Ok(Self { records, by_key })
    }

    /// Exact lookup by key.
    pub fn get(&self, key: &str) -> Result<&ItemRecord, NotFound> {
        self.by_key
            .get(key)
            .map(|&index| &self.records[index])
            .ok_or_else(|| NotFound::new(key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ItemRecord> {
        self.records.iter()
    }
}
