//! Error types for the chunk store adapter.

use std::path::PathBuf;

use creel_types::Namespace;

/// Errors that can occur during store and retrieve operations.
///
/// Nothing is retried internally and no partial-failure recovery is
/// attempted; every failure surfaces to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The write-once guard found chunk 0 already present; nothing was
    /// modified.
    #[error("file looks like it is already stored under namespace {namespace}")]
    AlreadyStored {
        /// Namespace that is already populated.
        namespace: Namespace,
    },

    /// An expected chunk key was absent on retrieval. Raised before any
    /// file write.
    #[error("missing chunk {index} in namespace {namespace}")]
    MissingChunk {
        /// Namespace being read.
        namespace: Namespace,
        /// Index of the absent chunk.
        index: u32,
    },

    /// The file path has no usable base name to derive a namespace from.
    #[error("path has no usable file name: {0}")]
    InvalidFileName(PathBuf),

    /// The requested chunk count exceeds the `u32` key range.
    #[error("chunk count {0} exceeds the addressable key range")]
    ChunkCountTooLarge(usize),

    /// Compression or decompression failed; on retrieval this indicates
    /// chunk loss, a wrong chunk count, or an interrupted store.
    #[error("codec error: {0}")]
    Codec(#[from] creel_codec::CodecError),

    /// The backing cache failed.
    #[error("cache error: {0}")]
    Cache(#[from] creel_cache::CacheError),

    /// An I/O error occurred reading or writing the local file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
