//! Error types for compression and chunking.

/// Errors that can occur while compressing or decompressing a payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload could not be decompressed: it was not produced by
    /// [`compress`](crate::compress), or chunks were lost or reordered
    /// before reassembly.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// An I/O error occurred in the compression stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
