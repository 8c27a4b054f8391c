//! Chunked base64 encoding.
//!
//! The buffer is walked in fixed-size sub-chunks, each encoded into a
//! growing output string. The stride is a multiple of 3 so every segment
//! encodes to whole base64 quanta and the concatenation equals the standard
//! encoding of the full buffer, padding included.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Sub-chunk stride in bytes. Must stay a multiple of 3.
const SUB_CHUNK: usize = 3072;

/// Encode `buf` to its standard base64 text form.
///
/// Pure function: the same buffer always yields the identical string.
pub fn encode_chunked(buf: &[u8]) -> String {
    let mut out = String::with_capacity(buf.len().div_ceil(3) * 4);
    for chunk in buf.chunks(SUB_CHUNK) {
        STANDARD.encode_string(chunk, &mut out);
    }
    out
}
