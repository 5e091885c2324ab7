//! Chunk store adapter: the write / read pipeline for files in the cache.
//!
//! [`ChunkStore`] ties the codec and the cache client together:
//! compress, digest, chunk, guard and write on store; multi-key read,
//! reassemble, decompress and verify on retrieve.
//!
//! The adapter holds a [`CacheClient`](creel_cache::CacheClient) handle
//! by composition and calls through it; it keeps no record of stored
//! namespaces — callers persist the returned metadata themselves.

mod error;
mod store;

pub use error::StoreError;
pub use store::ChunkStore;
