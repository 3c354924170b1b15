//! Key-value persistence for dashboard collections.
//!
//! # Keys
//!
//! - `addedProducts` - every product currently shown (baseline included)
//! - `addedOrders` - synthetic orders
//! - `addedUsers` - synthetic users
//! - `adminSettings` - the singleton settings record
//!
//! Values are stored as serialized JSON text. Reads fail soft: an absent
//! key or text that does not parse as the expected shape is treated as the
//! empty default. There is no schema versioning.

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur while writing to a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not read or write its medium.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Products,
    Orders,
    Users,
    Settings,
}

impl StorageKey {
    /// All keys, in a stable order.
    pub const ALL: [Self; 4] = [Self::Products, Self::Orders, Self::Users, Self::Settings];

    /// The key name as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "addedProducts",
            Self::Orders => "addedOrders",
            Self::Users => "addedUsers",
            Self::Settings => "adminSettings",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw string key-value store.
///
/// Implementations only move text around; typing and the fail-soft policy
/// live in [`StorageAdapter`].
pub trait Storage: Send {
    /// Read the text stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend medium cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Typed, fail-soft access to a [`Storage`] backend.
pub struct StorageAdapter {
    backend: Box<dyn Storage>,
}

impl std::fmt::Debug for StorageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAdapter").finish_non_exhaustive()
    }
}

impl StorageAdapter {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(backend: impl Storage + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// An adapter over a fresh in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Load the value stored under `key`.
    ///
    /// Never fails: a missing key, an unreadable backend, or unparseable
    /// content all yield `T::default()`.
    #[must_use]
    pub fn load<T>(&self, key: StorageKey) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.backend.get_item(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Storage read failed, using default");
                return T::default();
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Stored value is malformed, using default");
                T::default()
            }
        }
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save<T>(&mut self, key: StorageKey, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key.as_str(), &raw)?;
        tracing::debug!(key = %key, bytes = raw.len(), "Persisted");
        Ok(())
    }

    /// The raw text stored under `key`, bypassing parsing.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend medium cannot be read.
    pub fn raw(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        self.backend.get_item(key.as_str())
    }
}
