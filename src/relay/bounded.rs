//! Bounded body reading.
//!
//! # Responsibilities
//! - Consume a stream of byte chunks up to a byte threshold
//! - Stop pulling further chunks once the threshold is reached
//! - Concatenate accumulated chunks into one contiguous buffer
//!
//! # Design Decisions
//! - The threshold is checked only after a whole-chunk append; the chunk
//!   that crosses it is kept in full, so the result may exceed the
//!   threshold by up to one chunk length. Exact-byte truncation is
//!   deliberately not performed.
//! - A stream error aborts the read; no partial result is returned.

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

/// Read from `stream` until the accumulated length reaches `max_bytes` or
/// the stream ends, whichever comes first, and return one contiguous buffer.
///
/// An empty stream yields an empty buffer.
pub async fn read_bounded<S, E>(mut stream: S, max_bytes: usize) -> Result<Bytes, E>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    let mut received = 0usize;
    let mut chunks: Vec<Bytes> = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        received += chunk.len();
        chunks.push(chunk);
        if received >= max_bytes {
            break;
        }
    }

    let mut all = BytesMut::with_capacity(received);
    for chunk in &chunks {
        all.extend_from_slice(chunk);
    }
    Ok(all.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::convert::Infallible;

    fn chunk_stream(
        chunks: Vec<Vec<u8>>,
    ) -> impl Stream<Item = Result<Bytes, Infallible>> + Unpin {
        stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))))
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_buffer() {
        let buf = read_bounded(chunk_stream(vec![]), 16 * 1024).await.unwrap();
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn short_stream_returned_in_full() {
        let buf = read_bounded(chunk_stream(vec![vec![1; 100], vec![2; 200]]), 16 * 1024)
            .await
            .unwrap();
        assert_eq!(buf.len(), 300);
        assert_eq!(&buf[..100], &[1u8; 100][..]);
        assert_eq!(&buf[100..], &[2u8; 200][..]);
    }

    #[tokio::test]
    async fn crossing_chunk_is_kept_whole() {
        // 3 x 10000 bytes against a 16384 cap: the second chunk crosses the
        // cap and is kept, the third is never pulled.
        let buf = read_bounded(
            chunk_stream(vec![vec![0; 10_000], vec![0; 10_000], vec![0; 10_000]]),
            16 * 1024,
        )
        .await
        .unwrap();
        assert_eq!(buf.len(), 20_000);
    }

    #[tokio::test]
    async fn exact_cap_stops_reading() {
        let buf = read_bounded(
            chunk_stream(vec![vec![0; 16_384], vec![0; 1]]),
            16 * 1024,
        )
        .await
        .unwrap();
        assert_eq!(buf.len(), 16_384);
    }

    #[tokio::test]
    async fn stream_error_propagates() {
        let s = stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::other("boom")),
        ]);
        let err = read_bounded(s, 16 * 1024).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
