//! Streaming response consumer.
//!
//! Pulls chunks from a finite byte stream (an HTTP response body), decodes each
//! chunk as text and hands it to a callback in arrival order. Chunks are opaque
//! units: one chunk may hold a partial line or several lines, and nothing here
//! re-buffers to line boundaries.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use thiserror::Error;
use tracing::debug;

/// Errors from opening or reading a backend response stream.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be made, or the response status was non-success.
    #[error("request failed: {0}")]
    Network(String),
    /// A read from an already-open stream failed mid-flight.
    #[error("stream read failed: {0}")]
    StreamRead(String),
}

/// Drain `stream`, invoking `on_chunk` once per decoded chunk in arrival order.
///
/// Returns the number of chunks delivered on a clean end-of-stream, or the
/// first error encountered. The callback runs exactly once per chunk and never
/// after this function returns. Decoding is lossy per chunk, matching the
/// per-read `TextDecoder.decode` behavior of the browser client this replaces:
/// a UTF-8 sequence split across chunks decodes with replacement characters.
pub async fn consume<S, F>(mut stream: S, mut on_chunk: F) -> Result<usize, FetchError>
where
    S: Stream<Item = Result<Bytes, FetchError>> + Unpin,
    F: FnMut(String),
{
    let mut delivered = 0usize;
    while let Some(next) = stream.next().await {
        let bytes = next?;
        on_chunk(String::from_utf8_lossy(&bytes).into_owned());
        delivered += 1;
    }
    debug!("stream exhausted after {} chunks", delivered);
    Ok(delivered)
}
