//! Key-value persistence.
//!
//! Business logic only sees the [`KvStore`] trait, so the medium can be
//! swapped without touching it:
//!
//! - [`MemoryStore`] - process-local map, used by tests and offline demos
//! - [`JsonFileStore`] - a single JSON object file, rewritten atomically
//!
//! Values are opaque strings; callers serialize their own JSON, matching the
//! browser local-storage model the storefront was designed around.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data does not have the expected shape.
    #[error("Data corruption: {0}")]
    DataCorruption(String),

    /// A write would break a uniqueness rule (e.g., a repeated order id).
    #[error("Constraint violation: {0}")]
    Conflict(String),
}

/// Minimal string key-value store.
pub trait KvStore {
    /// Read a value; `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete a key. No-op if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
