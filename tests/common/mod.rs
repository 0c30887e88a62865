//! Shared test fixtures and utilities for integration tests.
//!
//! Each test gets its own [`TempWorkspace`] holding a config file and a
//! sticker-info file, so engines never share caches or files.

use rstest::fixture;
use std::path::{Path, PathBuf};
use sticker_search::{Config, SearchEngine};
use tempfile::TempDir;

/// Sticker-info file used by most tests.
///
/// `category` carries tags so metadata weighting can be exercised.
pub const SAMPLE_STICKERS: &str = r#"{
    "cat": {
        "filePath": "images/cat.png",
        "url": "https://cdn.test/cat.png",
        "metadata": { "tags": ["feline", "pet"] }
    },
    "category": {
        "filePath": "images/category.png",
        "url": "https://cdn.test/category.png",
        "metadata": { "tags": ["taxonomy"] }
    },
    "dog": {
        "filePath": "images/dog.png",
        "url": "https://cdn.test/dog.png",
        "metadata": { "tags": ["canine", "pet"] }
    },
    "hello world": {
        "text": "Hello World",
        "filePath": "images/hello.png",
        "url": "https://cdn.test/hello.png"
    }
}"#;

/// A temporary workspace directory for test isolation.
///
/// Cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content, creating parent directories as needed.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes `stickers.json` and a `config.toml` pointing at it.
    ///
    /// `extra` is appended to the config verbatim.
    pub fn write_config(&self, stickers: &str, extra: &str) -> PathBuf {
        self.create_file("stickers.json", stickers);
        self.create_file(
            "config.toml",
            &format!("sticker_info_path = \"stickers.json\"\n{}", extra),
        )
    }

    /// Loads the workspace config and builds an engine from it.
    pub fn engine(&self, config_path: &Path) -> (Config, SearchEngine) {
        let config = Config::load(config_path).expect("Failed to load config");
        let engine = SearchEngine::from_config(&config).expect("Failed to build engine");
        (config, engine)
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh workspace with tracing initialized.
#[fixture]
pub fn workspace() -> TempWorkspace {
    sticker_search::tracing::init();
    TempWorkspace::new()
}
