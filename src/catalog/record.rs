//! Catalog record types.

use std::fmt;

/// Name of the primary field, the text users search for and see.
pub const PRIMARY_FIELD: &str = "text";

/// Where a committed sticker is delivered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// Local file, relative to the sticker-info file unless absolute
    FilePath(String),
    /// Remote URL sent as-is
    Url(String),
}

impl ResourceRef {
    /// The raw path or URL.
    pub fn target(&self) -> &str {
        match self {
            Self::FilePath(path) => path,
            Self::Url(url) => url,
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FilePath(path) => write!(f, "file:{}", path),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// A named metadata value. Names may repeat for multi-valued metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub name: String,
    pub value: String,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Unique lookup key
    pub key: String,
    /// Primary search and display text
    pub text: String,
    /// Searchable metadata, in document order
    pub fields: Vec<FieldValue>,
    pub resource: ResourceRef,
}

impl ItemRecord {
    /// Create a record whose display text is its key.
    pub fn new(key: impl Into<String>, resource: ResourceRef) -> Self {
        let key = key.into();
        Self {
            text: key.clone(),
            key,
            fields: Vec::new(),
            resource,
        }
    }

    /// Override the display text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a metadata value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FieldValue::new(name, value));
        self
    }

    /// All values stored under `name`. The primary field name yields `text`.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let primary = (name == PRIMARY_FIELD).then_some(self.text.as_str());
        primary.into_iter().chain(
            self.fields
                .iter()
                .filter(move |field| field.name == name)
                .map(|field| field.value.as_str()),
        )
    }
}
