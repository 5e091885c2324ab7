//! Fixed-size chunker for splitting a compressed payload into
//! cache-sized segments.

use bytes::Bytes;

/// Fixed-size chunker.
///
/// A payload shorter than `chunk_size` (including an empty one) is
/// returned whole as a single chunk; anything else is split into
/// `chunk_size` segments in left-to-right order, with the remainder
/// retained as a final short chunk. The segment index is the cache key,
/// so reassembly is concatenation in ascending index order.
pub struct Chunker {
    chunk_size: u32,
}

impl Chunker {
    /// Create a new chunker with the given chunk size in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: u32) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self { chunk_size }
    }

    /// The configured chunk size in bytes.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Split a payload into fixed-size chunks.
    ///
    /// Always returns at least one chunk.
    pub fn chunk(&self, data: &[u8]) -> Vec<Bytes> {
        let chunk_size = self.chunk_size as usize;
        if data.len() < chunk_size {
            return vec![Bytes::copy_from_slice(data)];
        }
        data.chunks(chunk_size)
            .map(Bytes::copy_from_slice)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_empty_data_is_single_empty_chunk() {
        let chunker = Chunker::new(1024);
        let chunks = chunker.chunk(b"");
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn test_chunk_small_data_unsplit() {
        let chunker = Chunker::new(1024);
        let data = b"well under the limit";
        let chunks = chunker.chunk(data);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], data.as_slice());
    }

    #[test]
    fn test_chunk_exactly_chunk_size() {
        let chunker = Chunker::new(16);
        let data = vec![0xABu8; 16];
        let chunks = chunker.chunk(&data);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], data.as_slice());
    }

    #[test]
    fn test_chunk_exact_multiple() {
        let chunker = Chunker::new(16);
        let data = vec![0xABu8; 48];
        let chunks = chunker.chunk(&data);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 16));
    }

    #[test]
    fn test_chunk_size_plus_one_keeps_remainder() {
        let chunker = Chunker::new(16);
        let data = vec![0xCDu8; 17];
        let chunks = chunker.chunk(&data);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 16);
        assert_eq!(chunks[1].len(), 1);
    }

    #[test]
    fn test_chunk_three_and_half() {
        let chunker = Chunker::new(100);
        let data = vec![0xFFu8; 350];
        let chunks = chunker.chunk(&data);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].len(), 100);
        assert_eq!(chunks[1].len(), 100);
        assert_eq!(chunks[2].len(), 100);
        assert_eq!(chunks[3].len(), 50);
    }

    #[test]
    fn test_concatenation_reassembles_original() {
        let chunker = Chunker::new(7);
        let data: Vec<u8> = (0..200u16).map(|i| (i % 251) as u8).collect();
        let chunks = chunker.chunk(&data);

        let mut reassembled = Vec::new();
        for chunk in &chunks {
            reassembled.extend_from_slice(chunk);
        }
        assert_eq!(reassembled, data);
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn test_zero_chunk_size_panics() {
        Chunker::new(0);
    }
}
