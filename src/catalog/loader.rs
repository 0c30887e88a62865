//! Sticker-info file parsing.
//!
//! The file is JSON, either an object keyed by sticker text or an array of
//! sticker objects:
//!
//! ```json
//! {
//!   "cat": {
//!     "text": "cat",
//!     "filePath": "images/cat.png",
//!     "url": "https://cdn.example/cat.png",
//!     "metadata": { "tags": ["feline", "pet"] }
//!   }
//! }
//! ```
//!
//! Free-form `metadata` is flattened into named string fields (`metadata.tags`
//! above) so it can be weighted like any other field.

use crate::catalog::record::{FieldValue, ItemRecord, ResourceRef};
use crate::catalog::store::Catalog;
use crate::error::CatalogError;
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Root name under which metadata values are flattened.
const METADATA_FIELD: &str = "metadata";

/// How committed stickers are delivered, which decides the resource each record needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Upload the local image file (`filePath`)
    Upload,
    /// Reply with the image URL (`url`)
    Link,
}

impl DeliveryMode {
    /// `upload_image = true` selects [`DeliveryMode::Upload`].
    pub const fn from_upload_flag(upload_image: bool) -> Self {
        if upload_image { Self::Upload } else { Self::Link }
    }

    fn resource(self, key: &str, sticker: &RawSticker) -> Result<ResourceRef, CatalogError> {
        let (value, field, reason) = match self {
            Self::Upload => (
                sticker.file_path.clone().map(ResourceRef::FilePath),
                "filePath",
                "stickers are uploaded as files",
            ),
            Self::Link => (
                sticker.url.clone().map(ResourceRef::Url),
                "url",
                "stickers are sent as links",
            ),
        };

        value.ok_or_else(|| CatalogError::MissingResource {
            key: key.to_string(),
            field,
            reason,
        })
    }
}

/// One sticker entry as written in the file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSticker {
    text: Option<String>,
    file_path: Option<String>,
    url: Option<String>,
    #[serde(default)]
    metadata: Value,
}

/// Read and parse a sticker-info file.
pub fn load_catalog(path: &Path, mode: DeliveryMode) -> crate::error::Result<Catalog> {
    tracing::info!("Reading sticker info from {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sticker info at {}", path.display()))?;

    let catalog = parse_catalog(&content, mode)
        .with_context(|| format!("Malformed sticker info at {}", path.display()))?;

    tracing::info!("Loaded {} stickers ({:?} delivery)", catalog.len(), mode);
    Ok(catalog)
}

/// Parse sticker-info JSON into a validated catalog.
pub fn parse_catalog(json: &str, mode: DeliveryMode) -> Result<Catalog, CatalogError> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let records = match document {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| {
                let sticker = parse_sticker(value, &key)?;
                to_record(key, sticker, mode)
            })
            .collect::<Result<Vec<_>, _>>()?,
        Value::Array(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let sticker = parse_sticker(value, &format!("#{}", index))?;
                let key = sticker.text.clone().unwrap_or_default();
                if key.is_empty() {
                    return Err(CatalogError::EmptyKey { index });
                }
                to_record(key, sticker, mode)
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(CatalogError::Parse(format!(
                "expected an object or array of stickers, found {}",
                json_kind(&other)
            )));
        }
    };

    Catalog::load(records)
}

fn parse_sticker(value: Value, label: &str) -> Result<RawSticker, CatalogError> {
    serde_json::from_value(value)
        .map_err(|e| CatalogError::Parse(format!("sticker {}: {}", label, e)))
}

fn to_record(key: String, sticker: RawSticker, mode: DeliveryMode) -> Result<ItemRecord, CatalogError> {
    let resource = mode.resource(&key, &sticker)?;

    let mut record = ItemRecord::new(key, resource);
    if let Some(text) = sticker.text
        && text != record.key
    {
        tracing::debug!("Sticker '{}' displays as '{}'", record.key, text);
        record.text = text;
    }

    flatten_metadata(METADATA_FIELD, &sticker.metadata, &mut record.fields);
    Ok(record)
}

/// Flattens arbitrary JSON into `(name, value)` pairs.
///
/// Arrays repeat the current name, objects extend it with `.key`, nulls are dropped.
fn flatten_metadata(name: &str, value: &Value, out: &mut Vec<FieldValue>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => out.push(FieldValue::new(name, flag.to_string())),
        Value::Number(number) => out.push(FieldValue::new(name, number.to_string())),
        Value::String(text) => out.push(FieldValue::new(name, text.as_str())),
        Value::Array(items) => {
            for item in items {
                flatten_metadata(name, item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten_metadata(&format!("{}.{}", name, key), item, out);
            }
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
