//! Memcached cache backend.

use std::collections::HashMap;

use bytes::Bytes;
use creel_types::Namespace;
use memcache::{CommandError, MemcacheError};
use tracing::debug;

use crate::error::CacheError;
use crate::traits::CacheClient;

/// Cache backend speaking to a live memcached through the `memcache`
/// crate's binary-protocol client.
///
/// Memcached itself has no namespace concept, so chunk keys are rendered
/// as `"{namespace}:{index}"`. Entries are stored without expiration;
/// eviction is the cache's business. Keys must respect memcached's
/// 250-byte key limit, which bounds the usable file name length.
///
/// Connection pooling and timeouts are configured through the connection
/// URL and are opaque to this adapter.
pub struct MemcachedCache {
    client: memcache::Client,
}

impl MemcachedCache {
    /// Connect to memcached, e.g. `"memcache://127.0.0.1:11211"`.
    pub fn connect(url: &str) -> Result<Self, CacheError> {
        let client = memcache::Client::connect(url)?;
        Ok(Self { client })
    }

    fn render_key(namespace: &Namespace, index: u32) -> String {
        format!("{namespace}:{index}")
    }
}

impl CacheClient for MemcachedCache {
    fn add(&self, namespace: &Namespace, index: u32, value: Bytes) -> Result<bool, CacheError> {
        let key = Self::render_key(namespace, index);
        match self.client.add(&key, value.as_ref(), 0) {
            Ok(()) => Ok(true),
            Err(MemcacheError::CommandError(CommandError::KeyExists)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, namespace: &Namespace, index: u32, value: Bytes) -> Result<(), CacheError> {
        let key = Self::render_key(namespace, index);
        debug!(%namespace, index, size = value.len(), "set memcached entry");
        self.client.set(&key, value.as_ref(), 0)?;
        Ok(())
    }

    fn get(&self, namespace: &Namespace, index: u32) -> Result<Option<Bytes>, CacheError> {
        let key = Self::render_key(namespace, index);
        let value: Option<Vec<u8>> = self.client.get(&key)?;
        Ok(value.map(Bytes::from))
    }

    fn get_multi(
        &self,
        namespace: &Namespace,
        indices: &[u32],
    ) -> Result<HashMap<u32, Bytes>, CacheError> {
        let keys: Vec<String> = indices
            .iter()
            .map(|&index| Self::render_key(namespace, index))
            .collect();
        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();

        let values: HashMap<String, Vec<u8>> = self.client.gets(&key_refs)?;
        debug!(%namespace, requested = indices.len(), found = values.len(), "multi-get");

        let mut found = HashMap::with_capacity(values.len());
        for (key, value) in values {
            // The index is everything after the last separator; the
            // namespace itself may contain separators.
            if let Some(index) = key.rsplit(':').next().and_then(|s| s.parse().ok()) {
                found.insert(index, Bytes::from(value));
            }
        }
        Ok(found)
    }
}
