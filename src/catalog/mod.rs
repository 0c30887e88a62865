//! The sticker catalog: record types, the immutable key table, and the
//! sticker-info file loader.

pub mod loader;
pub mod record;
pub mod store;

pub use loader::{DeliveryMode, load_catalog, parse_catalog};
pub use record::{FieldValue, ItemRecord, PRIMARY_FIELD, ResourceRef};
pub use store::Catalog;
