//! In-process store.

use std::collections::HashMap;

use crate::error::{StorageError, StorageResult};

use super::KeyValueStore;

/// `HashMap`-backed store.
///
/// With a quota, the sum of key and value lengths may not exceed `limit`
/// bytes. A write that would exceed it fails and is not applied.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// Stored entries.
    entries: HashMap<String, String>,
    /// Optional byte limit.
    quota: Option<usize>,
    /// Current key + value bytes.
    used: usize,
}

impl MemoryStore {
    /// Creates an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store limited to `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Changes the byte limit. Existing entries are kept even if over it.
    pub fn set_quota(&mut self, limit: Option<usize>) {
        self.quota = limit;
    }

    /// Bytes currently held.
    #[must_use]
    pub const fn used_bytes(&self) -> usize {
        self.used
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
        let requested = self.used - replaced + key.len() + value.len();

        if let Some(limit) = self.quota {
            if requested > limit {
                return Err(StorageError::QuotaExceeded { limit, requested });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        self.used = requested;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if let Some(old) = self.entries.remove(key) {
            self.used -= key.len() + old.len();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "22").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("22"));
        assert_eq!(store.used_bytes(), 3);

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.used_bytes(), 0);
    }

    #[test]
    fn test_quota_refuses_without_applying() {
        let mut store = MemoryStore::with_quota(10);
        store.set("k", "12345").unwrap();

        let err = store.set("k", "1234567890").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { limit: 10, requested: 11 }
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("12345"));
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let mut store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();
        store.set("k", "987654321").unwrap();
        assert_eq!(store.used_bytes(), 10);
    }
}
