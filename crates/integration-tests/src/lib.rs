//! Integration tests for storedash.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storedash-integration-tests
//! ```
//!
//! Every test gets its own temporary data directory, so tests run in
//! parallel without sharing persisted state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use storedash_admin::loader::BaselineSource;
use storedash_admin::views::CellFormat;
use storedash_admin::{AdminDashboard, FileStorage, StorageAdapter, StorageKey};

/// A temporary data directory plus a baseline file.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Directory the file backend writes to.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// A fresh adapter over the data directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn storage(&self) -> StorageAdapter {
        StorageAdapter::new(FileStorage::open(self.data_dir()).expect("Failed to open storage"))
    }

    /// Write `products` as the baseline document and return its source.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn baseline(&self, products: &Value) -> BaselineSource {
        let path = self.dir.path().join("products.json");
        std::fs::write(&path, products.to_string()).expect("Failed to write baseline");
        BaselineSource::Path(path)
    }

    /// A baseline source that does not exist.
    #[must_use]
    pub fn missing_baseline(&self) -> BaselineSource {
        BaselineSource::Path(self.dir.path().join("missing.json"))
    }

    /// Start a dashboard over this context's storage.
    pub async fn start(&self, baseline: &BaselineSource) -> AdminDashboard {
        AdminDashboard::start(self.storage(), baseline, CellFormat::default()).await
    }

    /// The JSON currently persisted under `key`, read straight from disk.
    #[must_use]
    pub fn persisted(&self, key: StorageKey) -> Option<Value> {
        let path = self.data_dir().join(format!("{key}.json"));
        read_json(&path)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}
