//! Error types for cache access.

/// Errors that can occur talking to the backing cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The value exceeds the backend's per-entry size ceiling.
    #[error("value too large for cache entry: limit {limit} bytes, got {actual}")]
    ValueTooLarge {
        /// Per-entry ceiling in bytes.
        limit: u32,
        /// Size of the rejected value in bytes.
        actual: u64,
    },

    /// The backend reported a failure; opaque to callers.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// An I/O error occurred on the cache transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<memcache::MemcacheError> for CacheError {
    fn from(e: memcache::MemcacheError) -> Self {
        CacheError::Backend(e.to_string())
    }
}
