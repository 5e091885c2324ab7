//! [`ChunkStore`] — stores files as families of keyed cache entries.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use creel_cache::CacheClient;
use creel_codec::{Chunker, compress, decompress};
use creel_types::{DEFAULT_CHUNK_SIZE, FileDigest, Namespace, RetrievedFile, StoredFile};
use tracing::{debug, info};

use crate::error::StoreError;

/// Adapter that stores a file as a family of chunk entries in the cache
/// and reassembles it on retrieval.
///
/// Each stored object is either absent (no chunk 0 in its namespace) or
/// fully populated; a crash between chunk writes leaves a partial object
/// that the guard cannot distinguish from a stored one. Detecting and
/// cleaning that up is the caller's business — there is no delete
/// operation at this layer.
pub struct ChunkStore {
    cache: Arc<dyn CacheClient>,
    chunker: Chunker,
}

impl ChunkStore {
    /// Create a store with the default chunk size
    /// ([`DEFAULT_CHUNK_SIZE`]: the cache entry ceiling minus a 4 KiB
    /// bookkeeping margin).
    pub fn new(cache: Arc<dyn CacheClient>) -> Self {
        Self::with_chunk_size(cache, DEFAULT_CHUNK_SIZE)
    }

    /// Create a store with a custom chunk size.
    ///
    /// The chunk size must stay strictly below the cache's per-entry
    /// ceiling to leave room for cache-client bookkeeping.
    pub fn with_chunk_size(cache: Arc<dyn CacheClient>, chunk_size: u32) -> Self {
        Self {
            cache,
            chunker: Chunker::new(chunk_size),
        }
    }

    /// Store a file in the cache.
    ///
    /// Reads the file, digests the raw bytes, compresses them, chunks
    /// the compressed payload and writes each chunk under its zero-based
    /// index inside a namespace derived from the file's base name and
    /// digest.
    ///
    /// The write-once guard on chunk 0 is an atomic create-if-absent: if
    /// the namespace already holds a chunk 0, the call fails with
    /// [`StoreError::AlreadyStored`] without modifying the cache. Writes
    /// of the remaining chunks are index-ascending but not atomic across
    /// keys; at most one writer per namespace is a caller responsibility.
    pub fn put_file(&self, file_path: impl AsRef<Path>) -> Result<StoredFile, StoreError> {
        let file_path = file_path.as_ref();
        let raw = std::fs::read(file_path)?;

        info!(
            path = %file_path.display(),
            size = raw.len(),
            "put_file: starting write"
        );

        // Digest the raw bytes, never the compressed payload: the digest
        // identifies the file content as the caller knows it.
        let file_digest = FileDigest::from_data(&raw);
        let compressed = compress(&raw)?;
        let chunks = self.chunker.chunk(&compressed);
        debug!(
            compressed = compressed.len(),
            num_chunks = chunks.len(),
            chunk_size = self.chunker.chunk_size(),
            "chunked compressed payload"
        );

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidFileName(file_path.to_path_buf()))?;
        let namespace = Namespace::new(file_name, &file_digest);

        let number_of_chunks = chunks.len();
        for (index, chunk) in chunks.into_iter().enumerate() {
            let index = index as u32;
            if index == 0 {
                // Write-once guard: chunk 0 is created atomically, so a
                // second writer aborts here before touching anything
                // else in the namespace.
                if !self.cache.add(&namespace, 0, chunk)? {
                    info!(%namespace, "put_file: namespace already populated, aborting");
                    return Err(StoreError::AlreadyStored { namespace });
                }
            } else {
                self.cache.set(&namespace, index, chunk)?;
            }
        }

        info!(
            %namespace,
            %file_digest,
            chunks = number_of_chunks,
            "put_file: write complete"
        );

        Ok(StoredFile {
            local_path: file_path.to_path_buf(),
            number_of_chunks,
            file_digest,
            namespace,
        })
    }

    /// Retrieve a file from the cache and write it to `destination_dir`.
    ///
    /// Reads all `number_of_chunks` chunk keys in one multi-key round
    /// trip, reassembles them in ascending index order, decompresses and
    /// writes the result atomically (temp file in the destination
    /// directory, then rename). The output name is `file_name` if given,
    /// otherwise the name embedded in the namespace.
    ///
    /// The returned digest is computed fresh over the written file; the
    /// caller compares it against the digest recorded at store time. A
    /// mismatch is not an error at this layer.
    pub fn get_file(
        &self,
        namespace: &Namespace,
        number_of_chunks: usize,
        destination_dir: impl AsRef<Path>,
        file_name: Option<&str>,
    ) -> Result<RetrievedFile, StoreError> {
        let destination_dir = destination_dir.as_ref();

        info!(%namespace, chunks = number_of_chunks, "get_file: starting read");

        // Chunk keys are u32 indices; a count past that range cannot
        // have been written by put_file.
        let count = u32::try_from(number_of_chunks)
            .map_err(|_| StoreError::ChunkCountTooLarge(number_of_chunks))?;

        // One key per chunk, exactly: indices 0..number_of_chunks.
        let indices: Vec<u32> = (0..count).collect();
        let mut entries = self.cache.get_multi(namespace, &indices)?;

        let mut compressed = Vec::new();
        for index in indices {
            let chunk = entries
                .remove(&index)
                .ok_or_else(|| StoreError::MissingChunk {
                    namespace: namespace.clone(),
                    index,
                })?;
            compressed.extend_from_slice(&chunk);
        }

        let raw = decompress(&compressed)?;

        let file_name = file_name.unwrap_or_else(|| namespace.file_name());
        let path = destination_dir.join(file_name);

        // Atomic write: a uniquely named temp file in the destination
        // directory, then rename. A failed retrieve leaves nothing at
        // the destination, and sibling retrieves into the same directory
        // cannot collide on a shared temp path.
        let mut tmp = tempfile::NamedTempFile::new_in(destination_dir)?;
        tmp.write_all(&raw)?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %path.display(), size = raw.len(), "wrote reconstructed file");

        let file_digest = FileDigest::from_file(&path)?;

        info!(%namespace, %file_digest, "get_file: read complete");

        Ok(RetrievedFile { path, file_digest })
    }
}
