//! # Durable Key-Value Boundary
//!
//! The world reads and writes its state through an opaque string-keyed
//! store. Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: in-process map with an optional byte quota
//! - [`FileStore`]: single checksummed, compressed file, rewritten atomically
//!
//! A presentation layer with its own storage (browser local storage, a
//! platform preferences API) implements [`KeyValueStore`] directly.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageResult;

/// Opaque string-keyed durable storage.
pub trait KeyValueStore {
    /// Reads the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the medium cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write is refused or fails. A failed
    /// write leaves the previous value in place.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the medium cannot be written.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
