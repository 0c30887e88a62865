pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;
pub mod types;

pub use catalog::{Catalog, DeliveryMode, FieldValue, ItemRecord, ResourceRef};
pub use cli::Cli;
pub use config::Config;
pub use engine::{EngineOptions, EngineStats, SearchEngine};
pub use error::{CatalogError, IndexError, NotFound};
pub use search::{FieldWeight, FieldWeights, FuzzyIndex, ResultCache};
pub use server::{ServerSettings, StickerServer};
pub use types::MatchResult;
