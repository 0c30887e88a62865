//! TOML configuration.
//!
//! ```toml
//! sticker_info_path = "stickers.json"
//! upload_image = false
//! cache_max = 500
//!
//! [search]
//! text_weight = 1.0
//! metadata = [{ name = "metadata.tags", weight = 0.5 }]
//! score = false
//! limit = 25
//! threshold = 0.6
//! ```

use crate::catalog::DeliveryMode;
use crate::engine::EngineOptions;
use crate::error::Result;
use crate::search::{DEFAULT_THRESHOLD, FieldWeight, FieldWeights};
use anyhow::{Context, ensure};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub use crate::search::DEFAULT_CACHE_MAX;

/// Default number of autocomplete choices (the usual chat-platform maximum).
pub const DEFAULT_LIMIT: usize = 25;

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sticker-info JSON, relative to the config file unless absolute
    pub sticker_info_path: PathBuf,
    /// Upload sticker files instead of replying with URLs
    #[serde(default)]
    pub upload_image: bool,
    /// Result cache capacity; 0 disables caching
    #[serde(default = "default_cache_max")]
    pub cache_max: usize,
    #[serde(default)]
    pub search: SearchSettings,
}

/// Fuzzy search settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// Weight of the primary sticker text
    pub text_weight: f64,
    /// Additional weighted metadata fields
    pub metadata: Vec<FieldWeight>,
    /// Show match scores next to autocomplete choices
    pub score: bool,
    /// Maximum number of choices per query
    pub limit: usize,
    /// Highest score still considered a match
    pub threshold: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            text_weight: 1.0,
            metadata: Vec::new(),
            score: false,
            limit: DEFAULT_LIMIT,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

const fn default_cache_max() -> usize {
    DEFAULT_CACHE_MAX
}

impl Config {
    /// Read, parse, and validate a config file.
    ///
    /// `sticker_info_path` is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // Sticker file paths are reported as absolute
        let base_dir = std::path::absolute(parent)
            .with_context(|| format!("Failed to resolve directory of {}", path.display()))?;
        let config = Self::from_toml(&content, &base_dir)
            .with_context(|| format!("Invalid config at {}", path.display()))?;

        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse and validate TOML, resolving relative paths against `base_dir`.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse TOML")?;

        let raw = config.sticker_info_path.to_string_lossy();
        let expanded = PathBuf::from(expand_tilde(&raw).into_owned());
        config.sticker_info_path = if expanded.is_absolute() {
            expanded
        } else {
            base_dir.join(expanded)
        };

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the TOML types cannot express.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        self.field_weights().validate()?;
        ensure!(search.limit > 0, "search.limit must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&search.threshold),
            "search.threshold must be between 0 and 1, got {}",
            search.threshold
        );
        Ok(())
    }

    /// Primary and metadata weights for the index.
    pub fn field_weights(&self) -> FieldWeights {
        FieldWeights::new(self.search.text_weight).with_fields(self.search.metadata.iter().cloned())
    }

    pub const fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::from_upload_flag(self.upload_image)
    }

    pub const fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            include_score: self.search.score,
            cache_capacity: self.cache_max,
            threshold: self.search.threshold,
        }
    }

    /// Directory that relative sticker file paths are resolved against.
    pub fn asset_root(&self) -> &Path {
        self.sticker_info_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use assert2::{check, let_assert};
    use rstest::rstest;

    const FULL: &str = r#"
        sticker_info_path = "stickers.json"
        upload_image = true
        cache_max = 10

        [search]
        text_weight = 2.0
        metadata = [{ name = "metadata.tags", weight = 0.5 }]
        score = true
        limit = 5
        threshold = 0.4
    "#;

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(FULL, Path::new("/srv/bot")).unwrap();

        check!(config.sticker_info_path == PathBuf::from("/srv/bot/stickers.json"));
        check!(config.asset_root() == Path::new("/srv/bot"));
        check!(config.delivery_mode() == DeliveryMode::Upload);
        check!(config.search.limit == 5);

        let weights: Vec<(String, f64)> = config
            .field_weights()
            .iter()
            .map(|(name, weight)| (name.to_string(), weight))
            .collect();
        check!(weights == vec![("text".to_string(), 2.0), ("metadata.tags".to_string(), 0.5)]);

        let options = config.engine_options();
        check!(options.include_score);
        check!(options.cache_capacity == 10);
        check!(options.threshold == 0.4);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml(r#"sticker_info_path = "s.json""#, Path::new("cfg")).unwrap();

        check!(config.sticker_info_path == PathBuf::from("cfg/s.json"));
        check!(config.delivery_mode() == DeliveryMode::Link);
        check!(config.cache_max == DEFAULT_CACHE_MAX);
        check!(config.search.limit == DEFAULT_LIMIT);
        check!(config.search.text_weight == 1.0);
        check!(config.search.metadata.is_empty());
        check!(!config.search.score);
    }

    #[test]
    fn test_absolute_path_kept() {
        let config =
            Config::from_toml(r#"sticker_info_path = "/data/s.json""#, Path::new("cfg")).unwrap();
        check!(config.sticker_info_path == PathBuf::from("/data/s.json"));
    }

    #[rstest]
    #[case("sticker_info_path = \"s.json\"\n[search]\ntext_weight = 0.0")]
    #[case("sticker_info_path = \"s.json\"\n[search]\nmetadata = [{ name = \"metadata\", weight = -1.0 }]")]
    #[case("sticker_info_path = \"s.json\"\n[search]\nlimit = 0")]
    #[case("sticker_info_path = \"s.json\"\n[search]\nthreshold = 1.5")]
    #[case("sticker_info_path = \"s.json\"\nunknown_key = 1")]
    #[case("upload_image = true")]
    #[case("sticker_info_path = ")]
    fn test_invalid_configs(#[case] content: &str) {
        let_assert!(Err(_) = Config::from_toml(content, Path::new(".")));
    }

    #[test]
    fn test_weight_error_names_field() {
        let content = "sticker_info_path = \"s.json\"\n[search]\nmetadata = [{ name = \"metadata.tags\", weight = 0.0 }]";
        let_assert!(Err(error) = Config::from_toml(content, Path::new(".")));
        let_assert!(Some(IndexError::InvalidWeight { field, .. }) = error.downcast_ref::<IndexError>());
        check!(field == "metadata.tags");
    }

    #[test]
    fn test_expand_tilde() {
        check!(expand_tilde("/absolute/path") == "/absolute/path");
        check!(expand_tilde("relative/path") == "relative/path");
        if let Some(home) = dirs::home_dir() {
            check!(expand_tilde("~/stickers.json") == home.join("stickers.json").display().to_string());
        }
    }
}
