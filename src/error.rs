//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for startup paths (config, catalog file, server).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods. The search core itself returns the typed errors below.
pub type Result<T> = anyhow::Result<T>;

/// A catalog that cannot be loaded. Fatal to initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two records share a key.
    #[error("duplicate sticker key '{key}' (records #{first} and #{second})")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },
    /// A record has an empty key.
    #[error("record #{index} has an empty key")]
    EmptyKey { index: usize },
    /// The resource required by the delivery mode is not set on the record.
    #[error("sticker '{key}' has no {field}, which is required when {reason}")]
    MissingResource {
        key: String,
        field: &'static str,
        reason: &'static str,
    },
    /// The resource reference is present but empty.
    #[error("sticker '{key}' has an empty resource reference")]
    EmptyResource { key: String },
    /// The catalog document is not valid JSON or has the wrong shape.
    #[error("invalid sticker info: {0}")]
    Parse(String),
}

/// An index that cannot be built from the given field weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    #[error("field '{field}' has invalid weight {weight}; weights must be finite and positive")]
    InvalidWeight { field: String, weight: f64 },
}

/// Returned by exact lookups when no record has the requested key.
///
/// This is an expected outcome of user input, not a failure of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sticker with text '{key}' not found")]
pub struct NotFound {
    pub key: String,
}

impl NotFound {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_messages_name_the_offending_record() {
        let err = CatalogError::DuplicateKey {
            key: "cat".to_string(),
            first: 0,
            second: 3,
        };
        check!(err.to_string() == "duplicate sticker key 'cat' (records #0 and #3)");

        let err = CatalogError::MissingResource {
            key: "dog".to_string(),
            field: "url",
            reason: "stickers are sent as links",
        };
        check!(err.to_string().contains("'dog'"));
        check!(err.to_string().contains("url"));
    }

    #[test]
    fn test_not_found_display() {
        check!(NotFound::new("dog").to_string() == "sticker with text 'dog' not found");
    }
}
