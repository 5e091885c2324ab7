//! In-memory cache backend.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use bytes::Bytes;
use creel_types::{MAX_ENTRY_SIZE, Namespace};
use tracing::debug;

use crate::error::CacheError;
use crate::traits::CacheClient;

/// In-memory cache backed by a `RwLock<HashMap>`.
///
/// Useful for testing and for running the pipeline without a live
/// memcached. Enforces the same per-entry value size ceiling as the real
/// cache so oversized chunks fail here the way they would fail there.
/// [`CacheClient::add`] is atomic under the write lock.
pub struct MemoryCache {
    entries: RwLock<HashMap<(String, u32), Bytes>>,
    max_value_size: u32,
}

impl MemoryCache {
    /// Create a cache with the standard per-entry ceiling
    /// ([`MAX_ENTRY_SIZE`]).
    pub fn new() -> Self {
        Self::with_max_value_size(MAX_ENTRY_SIZE)
    }

    /// Create a cache with a custom per-entry ceiling.
    pub fn with_max_value_size(max_value_size: u32) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_value_size,
        }
    }

    /// Number of entries currently stored, across all namespaces.
    pub fn entry_count(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    fn check_size(&self, value: &Bytes) -> Result<(), CacheError> {
        if value.len() as u64 > self.max_value_size as u64 {
            return Err(CacheError::ValueTooLarge {
                limit: self.max_value_size,
                actual: value.len() as u64,
            });
        }
        Ok(())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheClient for MemoryCache {
    fn add(&self, namespace: &Namespace, index: u32, value: Bytes) -> Result<bool, CacheError> {
        self.check_size(&value)?;
        let mut map = self.entries.write().expect("lock poisoned");
        match map.entry((namespace.as_str().to_owned(), index)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                debug!(%namespace, index, size = value.len(), "added cache entry");
                slot.insert(value);
                Ok(true)
            }
        }
    }

    fn set(&self, namespace: &Namespace, index: u32, value: Bytes) -> Result<(), CacheError> {
        self.check_size(&value)?;
        let mut map = self.entries.write().expect("lock poisoned");
        debug!(%namespace, index, size = value.len(), "set cache entry");
        map.insert((namespace.as_str().to_owned(), index), value);
        Ok(())
    }

    fn get(&self, namespace: &Namespace, index: u32) -> Result<Option<Bytes>, CacheError> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.get(&(namespace.as_str().to_owned(), index)).cloned())
    }

    fn get_multi(
        &self,
        namespace: &Namespace,
        indices: &[u32],
    ) -> Result<HashMap<u32, Bytes>, CacheError> {
        let map = self.entries.read().expect("lock poisoned");
        let mut found = HashMap::with_capacity(indices.len());
        for &index in indices {
            if let Some(value) = map.get(&(namespace.as_str().to_owned(), index)) {
                found.insert(index, value.clone());
            }
        }
        Ok(found)
    }
}
