//! Whole-payload zlib compression.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::CodecError;

/// Compress a payload with zlib deflate.
///
/// Deterministic and lossless; [`decompress`] is the exact inverse for
/// any output of this function. No side effects.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a payload produced by [`compress`].
///
/// Input not produced by [`compress`] fails with
/// [`CodecError::CorruptPayload`]. The stream must run to its end
/// marker and checksum trailer exactly at the end of the input: a
/// truncated reassembly (lost chunks, an undercounted chunk total, an
/// interrupted store) and trailing bytes beyond the stream both fail
/// rather than yielding a silently shortened payload.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(2).max(1024));

    loop {
        if out.len() == out.capacity() {
            out.reserve(32 * 1024);
        }
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(|e| CodecError::CorruptPayload(e.to_string()))?;

        match status {
            Status::StreamEnd => {
                if (inflater.total_in() as usize) < data.len() {
                    return Err(CodecError::CorruptPayload(
                        "trailing bytes after end of stream".to_string(),
                    ));
                }
                return Ok(out);
            }
            Status::Ok | Status::BufError => {
                // Progress means consuming input or filling the output
                // buffer (which grows next iteration). Neither happening
                // means the input ran out mid-stream.
                let progressed =
                    inflater.total_in() as usize > consumed || out.len() == out.capacity();
                if !progressed {
                    return Err(CodecError::CorruptPayload(
                        "stream ended before its end marker".to_string(),
                    ));
                }
            }
        }
    }
}
