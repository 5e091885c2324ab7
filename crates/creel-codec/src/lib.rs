//! Compression and chunking for the Creel storage pipeline.
//!
//! This crate provides:
//! - [`compress`] / [`decompress`] — zlib deflate of a whole payload.
//! - [`Chunker`] — splits a compressed payload into cache-sized chunks.
//!
//! Chunk boundaries are a pure function of position, so reassembly is
//! plain concatenation in index order with no stored delimiters.

mod chunker;
mod compress;
mod error;

pub use chunker::Chunker;
pub use compress::{compress, decompress};
pub use error::CodecError;
