use std::collections::VecDeque;
use std::io::{self, Read};
use std::iter::FusedIterator;

use crate::config::ReaderConfig;
use crate::error::DecodeError;
use crate::reader::RecordReader;

/// Default read size for [`ChunkedReader`].
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Blocking pipeline driver — turns a sequence of byte chunks into a
/// sequence of payloads.
///
/// The upstream is any iterator of `io::Result` chunks. A normal end of
/// that iterator runs [`RecordReader::finish`]; an `Err` item is passed
/// downstream as [`DecodeError::Upstream`] and the partial record is
/// dropped.
///
/// ```text
///   chunks ─▶ RecordReader ─▶ ready queue ─▶ next()
///                  │
///                  └─ terminal error, yielded after queued payloads
/// ```
///
/// Payloads completed before an error are always yielded before the
/// error. After the error (or a clean end) the iterator is fused.
///
/// # Example
///
/// ```rust
/// use recordio_decoder::Records;
///
/// let chunks = vec![Ok(b"3\nfo".to_vec()), Ok(b"o2\nhi".to_vec())];
/// let payloads: Result<Vec<_>, _> = Records::new(chunks.into_iter()).collect();
///
/// assert_eq!(payloads.unwrap(), vec![b"foo".to_vec(), b"hi".to_vec()]);
/// ```
pub struct Records<I> {
    chunks: I,
    reader: RecordReader,
    ready: VecDeque<Vec<u8>>,
    error: Option<DecodeError>,
    done: bool,
}

impl<I> Records<I> {
    pub fn new(chunks: I) -> Self {
        Self::with_config(chunks, ReaderConfig::default())
    }

    pub fn with_config(chunks: I, config: ReaderConfig) -> Self {
        Self {
            chunks,
            reader: RecordReader::with_config(config),
            ready: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// The reader driving this iterator, for inspecting its state.
    pub fn reader(&self) -> &RecordReader {
        &self.reader
    }
}

impl<R: Read> Records<ChunkedReader<R>> {
    /// Read records from a blocking reader in
    /// [`DEFAULT_CHUNK_SIZE`]-byte chunks.
    pub fn from_read(source: R) -> Self {
        Self::new(ChunkedReader::new(source))
    }
}

impl<I, C> Iterator for Records<I>
where
    I: Iterator<Item = io::Result<C>>,
    C: AsRef<[u8]>,
{
    type Item = Result<Vec<u8>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.ready.pop_front() {
                return Some(Ok(record));
            }
            if let Some(err) = self.error.take() {
                self.done = true;
                return Some(Err(err));
            }
            if self.done {
                return None;
            }

            match self.chunks.next() {
                Some(Ok(chunk)) => {
                    let ready = &mut self.ready;
                    if let Err(err) = self
                        .reader
                        .consume_with(chunk.as_ref(), |record| ready.push_back(record))
                    {
                        self.error = Some(err);
                    }
                }
                Some(Err(err)) => self.error = Some(self.reader.fail_upstream(err)),
                None => match self.reader.finish() {
                    Ok(()) => self.done = true,
                    Err(err) => self.error = Some(err),
                },
            }
        }
    }
}

impl<I, C> FusedIterator for Records<I>
where
    I: Iterator<Item = io::Result<C>>,
    C: AsRef<[u8]>,
{
}

/// Adapts a blocking [`Read`] into an iterator of owned chunks.
///
/// Each item is the result of one `read` call, so chunk sizes follow
/// whatever the source returns (at most `chunk_size`). `Interrupted`
/// reads are retried. After an error or end of input the iterator is
/// fused.
pub struct ChunkedReader<R> {
    source: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ChunkedReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_chunk_size(source, DEFAULT_CHUNK_SIZE)
    }

    /// A `chunk_size` of zero is treated as one.
    pub fn with_chunk_size(source: R, chunk_size: usize) -> Self {
        Self {
            source,
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }
}

impl<R: Read> Iterator for ChunkedReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.chunk_size];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    buf.truncate(n);
                    return Some(Ok(buf));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for ChunkedReader<R> {}
