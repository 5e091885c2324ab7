//! Cache client contract and backend implementations.
//!
//! This crate defines the [`CacheClient`] trait the chunk store writes
//! through, along with two concrete backends:
//!
//! - [`MemoryCache`] — in-memory backend backed by a `RwLock<HashMap>`,
//!   enforcing the same per-entry size ceiling as the real cache.
//! - [`MemcachedCache`] — thin adapter over a live memcached.
//!
//! The namespace is an explicit parameter on every call; no backend
//! carries namespace state between calls.

mod error;
mod memcached;
mod memory_cache;
mod traits;

pub use error::CacheError;
pub use memcached::MemcachedCache;
pub use memory_cache::MemoryCache;
pub use traits::CacheClient;
