//! Core trait for namespaced key-value cache access.

use std::collections::HashMap;

use bytes::Bytes;
use creel_types::Namespace;

use crate::error::CacheError;

/// Trait for the backing key-value cache.
///
/// Chunk keys are zero-based `u32` indices scoped to an explicit
/// [`Namespace`] passed on every call; implementations must not carry
/// namespace state between calls. All implementations must be
/// `Send + Sync`.
pub trait CacheClient: Send + Sync {
    /// Store a value only if the key is absent.
    ///
    /// Returns `true` if the value was stored, `false` if the key already
    /// existed. The existence check and the write are atomic within the
    /// backend, which makes this usable as a write-once guard.
    fn add(&self, namespace: &Namespace, index: u32, value: Bytes) -> Result<bool, CacheError>;

    /// Store a value, overwriting any existing entry.
    fn set(&self, namespace: &Namespace, index: u32, value: Bytes) -> Result<(), CacheError>;

    /// Retrieve a value. Returns `None` if the key is absent.
    fn get(&self, namespace: &Namespace, index: u32) -> Result<Option<Bytes>, CacheError>;

    /// Retrieve several values in one round trip.
    ///
    /// Absent keys are simply missing from the returned map; callers
    /// decide whether that is an error.
    fn get_multi(
        &self,
        namespace: &Namespace,
        indices: &[u32],
    ) -> Result<HashMap<u32, Bytes>, CacheError>;
}
