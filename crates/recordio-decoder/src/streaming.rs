use std::collections::VecDeque;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::ReaderConfig;
use crate::error::DecodeError;
use crate::reader::RecordReader;
use crate::records::DEFAULT_CHUNK_SIZE;

/// Asynchronous streaming decoder — yields payloads one at a time from
/// any `AsyncRead` source.
///
/// This is the entry point for network streams (an HTTP response body
/// carrying a long-lived event subscription, a TCP socket, a pipe).
/// Each `read` on the source becomes one chunk for the underlying
/// [`RecordReader`]; chunk boundaries never need to line up with
/// records. Backpressure is natural: the source is only read when the
/// caller awaits the next payload and nothing is queued.
///
/// # Example
///
/// ```rust,no_run
/// use recordio_decoder::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn drain(source: impl AsyncRead + Unpin) {
///     let mut stream = StreamingDecoder::new(source);
///     while let Some(payload) = stream.next().await.transpose().unwrap() {
///         // Hand each payload to the message decoder...
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    source: R,
    reader: RecordReader,
    /// Payloads completed by the last chunk, not yet handed out.
    ready: VecDeque<Vec<u8>>,
    /// Terminal error, yielded once `ready` drains.
    error: Option<DecodeError>,
    state: StreamState,
    /// Read buffer, reused for every chunk.
    buf: Vec<u8>,
}

/// ```text
///   Reading → Done
/// ```
///
/// `Done` is entered on end of input, upstream failure, or a framing
/// error. Queued payloads are still handed out after the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Reading,
    Done,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    #[must_use]
    pub fn new(source: R) -> Self {
        Self::with_options(source, DEFAULT_CHUNK_SIZE, ReaderConfig::default())
    }

    /// Create a decoder that reads at most `chunk_size` bytes per read
    /// (minimum one) and applies `config` limits.
    #[must_use]
    pub fn with_options(source: R, chunk_size: usize, config: ReaderConfig) -> Self {
        Self {
            source,
            reader: RecordReader::with_config(config),
            ready: VecDeque::new(),
            error: None,
            state: StreamState::Reading,
            buf: vec![0u8; chunk_size.max(1)],
        }
    }

    /// Read the next payload from the stream.
    ///
    /// Returns `Some(Ok(payload))` for each completed record, `Some(Err)`
    /// once for a terminal error, and `None` after a clean end of input
    /// or after the error has been returned.
    pub async fn next(&mut self) -> Option<Result<Vec<u8>, DecodeError>> {
        loop {
            if let Some(record) = self.ready.pop_front() {
                return Some(Ok(record));
            }
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }
            if self.state == StreamState::Done {
                return None;
            }

            let n = match self.source.read(&mut self.buf).await {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.state = StreamState::Done;
                    return Some(Err(self.reader.fail_upstream(e)));
                }
            };

            if n == 0 {
                self.state = StreamState::Done;
                if let Err(err) = self.reader.finish() {
                    self.error = Some(err);
                }
                continue;
            }

            let ready = &mut self.ready;
            if let Err(err) = self
                .reader
                .consume_with(&self.buf[..n], |record| ready.push_back(record))
            {
                self.state = StreamState::Done;
                self.error = Some(err);
            }
        }
    }

    /// Drain the stream into a vector, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] reported by [`next`](Self::next).
    pub async fn collect_all(&mut self) -> Result<Vec<Vec<u8>>, DecodeError> {
        let mut out = Vec::new();
        while let Some(result) = self.next().await {
            out.push(result?);
        }
        Ok(out)
    }

    /// The reader driving this stream, for inspecting its state.
    pub fn reader(&self) -> &RecordReader {
        &self.reader
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use tokio::io::ReadBuf;

    use super::*;
    use crate::error::Truncation;
    use recordio_encoder::RecordEncoder;

    /// Yields `data` in full, then fails every subsequent read.
    struct FailingSource {
        data: Vec<u8>,
        pos: usize,
    }

    impl AsyncRead for FailingSource {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.pos < self.data.len() {
                let start = self.pos;
                let n = (self.data.len() - start).min(buf.remaining());
                buf.put_slice(&self.data[start..start + n]);
                self.pos += n;
                Poll::Ready(Ok(()))
            } else {
                Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset by peer",
                )))
            }
        }
    }

    fn sample_stream() -> Vec<u8> {
        RecordEncoder::new()
            .add_record(b"{\"type\":\"SUBSCRIBED\"}")
            .add_record(b"{\"type\":\"HEARTBEAT\"}")
            .add_record(b"")
            .add_record(&[0xFF; 300])
            .encode()
            .unwrap()
    }

    #[tokio::test]
    async fn streaming_yields_all_records() {
        let mut decoder = StreamingDecoder::new(io::Cursor::new(sample_stream()));
        let records = decoder.collect_all().await.unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[1], b"{\"type\":\"HEARTBEAT\"}");
        assert!(records[2].is_empty());
        assert_eq!(records[3], vec![0xFF; 300]);
        assert!(decoder.next().await.is_none());
    }

    #[tokio::test]
    async fn streaming_one_byte_reads() {
        let stream = sample_stream();
        let mut decoder =
            StreamingDecoder::with_options(io::Cursor::new(stream), 1, ReaderConfig::default());
        let records = decoder.collect_all().await.unwrap();

        assert_eq!(records.len(), 4);
        assert!(decoder.reader().is_clean());
    }

    #[tokio::test]
    async fn streaming_matches_sync_decoder() {
        let stream = sample_stream();
        let sync_records = crate::RecordDecoder::decode(&stream).unwrap();

        let mut decoder =
            StreamingDecoder::with_options(io::Cursor::new(stream), 13, ReaderConfig::default());
        assert_eq!(decoder.collect_all().await.unwrap(), sync_records);
    }

    #[tokio::test]
    async fn streaming_empty_source() {
        let mut decoder = StreamingDecoder::new(io::Cursor::new(Vec::new()));
        assert!(decoder.next().await.is_none());
    }

    #[tokio::test]
    async fn streaming_reports_truncation() {
        let mut decoder = StreamingDecoder::new(io::Cursor::new(b"2\nhi9\nabc".to_vec()));
        assert_eq!(decoder.next().await.unwrap().unwrap(), b"hi");
        assert!(matches!(
            decoder.next().await,
            Some(Err(DecodeError::TruncatedStream(Truncation::Payload {
                expected: 9,
                received: 3
            })))
        ));
        assert!(decoder.next().await.is_none());
    }

    #[tokio::test]
    async fn streaming_malformed_after_valid_records() {
        let mut decoder = StreamingDecoder::new(io::Cursor::new(b"1\na1\nbZZ".to_vec()));
        assert_eq!(decoder.next().await.unwrap().unwrap(), b"a");
        assert_eq!(decoder.next().await.unwrap().unwrap(), b"b");
        assert!(matches!(
            decoder.next().await,
            Some(Err(DecodeError::MalformedLength { byte: b'Z', offset: 6 }))
        ));
        assert!(decoder.next().await.is_none());
    }

    #[tokio::test]
    async fn streaming_upstream_error() {
        let source = FailingSource {
            data: b"3\nabc4\nde".to_vec(),
            pos: 0,
        };
        let mut decoder = StreamingDecoder::new(source);
        assert_eq!(decoder.next().await.unwrap().unwrap(), b"abc");
        assert!(matches!(
            decoder.next().await,
            Some(Err(DecodeError::Upstream(_)))
        ));
        assert!(decoder.next().await.is_none());
        assert_eq!(decoder.reader().buffered_payload_len(), 0);
    }
}
