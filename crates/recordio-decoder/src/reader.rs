use recordio_wire::{NEWLINE, WireError, parse_length_digits};

use crate::config::ReaderConfig;
use crate::error::{ConsumeError, DecodeError, Truncation};

/// Upper bound on the payload buffer reserved up front. Larger records
/// grow the buffer as their bytes arrive, so a hostile length prefix
/// cannot force a huge allocation before any payload is received.
const MAX_PREALLOC: usize = 64 * 1024;

/// Incremental RecordIO reader — turns arbitrarily split byte chunks
/// into complete payloads.
///
/// The reader owns a single accumulator that survives between chunks.
/// Feeding a chunk copies its bytes into the accumulator and emits
/// every payload the chunk completes, in stream order. No chunk is
/// retained after the call that delivered it, and no byte is examined
/// twice.
///
/// ```text
///   "5\nhel"  →  AwaitingPayload(remaining=2, buffered="hel")
///   "lo3\n"   →  emit "hello", AwaitingLength("3") → AwaitingPayload(3)
///   "abc"     →  emit "abc",   AwaitingLength("")
/// ```
///
/// The reader has no notion of I/O or concurrency. Pipelines drive it
/// by calling [`consume`](Self::consume) or
/// [`consume_with`](Self::consume_with) once per chunk and
/// [`finish`](Self::finish) when the source completes; see
/// [`Records`](crate::Records) and
/// [`StreamingDecoder`](crate::StreamingDecoder).
///
/// # Example
///
/// ```rust
/// use recordio_decoder::RecordReader;
///
/// let mut reader = RecordReader::new();
/// assert!(reader.consume(b"1").unwrap().is_empty());
/// assert!(reader.consume(b"1\nhello ").unwrap().is_empty());
/// let records = reader.consume(b"world0\n").unwrap();
///
/// assert_eq!(records, vec![b"hello world".to_vec(), Vec::new()]);
/// reader.finish().unwrap();
/// ```
#[derive(Debug)]
pub struct RecordReader {
    state: ReaderState,
    config: ReaderConfig,
    /// Total bytes accepted so far, used for error offsets.
    consumed: u64,
}

/// Accumulator state. Exactly one partial record is live at a time.
#[derive(Debug)]
enum ReaderState {
    /// Collecting the digits of the next length prefix.
    AwaitingLength { digits: Vec<u8> },

    /// Collecting payload bytes. `remaining` is never zero here.
    AwaitingPayload { payload: Vec<u8>, remaining: usize },

    /// A terminal error was reported.
    Failed,
}

impl ReaderState {
    fn awaiting_length() -> Self {
        Self::AwaitingLength { digits: Vec::new() }
    }
}

impl Default for RecordReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordReader {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ReaderConfig) -> Self {
        Self {
            state: ReaderState::awaiting_length(),
            config,
            consumed: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Feed one chunk, collecting every completed payload.
    ///
    /// # Errors
    ///
    /// Any error from [`consume_with`](Self::consume_with), wrapped in a
    /// [`ConsumeError`] together with the payloads the chunk completed
    /// before the error.
    pub fn consume(&mut self, chunk: &[u8]) -> Result<Vec<Vec<u8>>, ConsumeError> {
        let mut records = Vec::new();
        match self.consume_with(chunk, |record| records.push(record)) {
            Ok(_) => Ok(records),
            Err(error) => Err(ConsumeError { records, error }),
        }
    }

    /// Feed one chunk, calling `emit` once per completed payload.
    ///
    /// The whole chunk is processed before returning. An empty chunk is a
    /// no-op.
    ///
    /// # Returns
    ///
    /// The number of payloads emitted.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MalformedLength`] if a length prefix contains a
    ///   byte other than `0-9` or `\n`.
    /// - [`DecodeError::EmptyLength`] if a newline arrives before any digit.
    /// - [`DecodeError::LengthTooLong`] if a digit run exceeds the limit.
    /// - [`DecodeError::LengthOverflow`] if the length does not fit in a
    ///   `usize`.
    /// - [`DecodeError::RecordTooLarge`] if a length exceeds
    ///   `max_record_size`.
    /// - [`DecodeError::ReaderFailed`] if the reader already failed.
    ///
    /// Payloads completed before the offending byte have already been
    /// passed to `emit`. The reader is terminated by any error.
    pub fn consume_with<F>(&mut self, chunk: &[u8], mut emit: F) -> Result<usize, DecodeError>
    where
        F: FnMut(Vec<u8>),
    {
        let mut cursor = 0;
        let mut emitted = 0;

        if matches!(self.state, ReaderState::Failed) {
            return Err(DecodeError::ReaderFailed);
        }

        while cursor < chunk.len() {
            match &mut self.state {
                ReaderState::AwaitingLength { digits } => {
                    let rest = &chunk[cursor..];
                    let run = rest
                        .iter()
                        .position(|b| !b.is_ascii_digit())
                        .unwrap_or(rest.len());

                    let seen = digits.len() + run;
                    if seen > self.config.max_length_digits {
                        let err = DecodeError::LengthTooLong {
                            digits: seen,
                            limit: self.config.max_length_digits,
                        };
                        return Err(self.fail(err, cursor));
                    }
                    digits.extend_from_slice(&rest[..run]);
                    cursor += run;

                    // Length continues in the next chunk.
                    if cursor == chunk.len() {
                        break;
                    }

                    let byte = chunk[cursor];
                    if byte != NEWLINE {
                        let offset = self.offset_at(cursor);
                        return Err(self.fail(DecodeError::MalformedLength { byte, offset }, cursor));
                    }

                    let len = match parse_length_digits(digits) {
                        Ok(len) => len,
                        Err(WireError::EmptyLength { .. }) => {
                            let offset = self.offset_at(cursor);
                            return Err(self.fail(DecodeError::EmptyLength { offset }, cursor));
                        }
                        Err(_) => {
                            let err = DecodeError::LengthOverflow {
                                digits: digits.len(),
                            };
                            return Err(self.fail(err, cursor));
                        }
                    };
                    cursor += 1;

                    if let Err(err) = self.config.check_record_size(len) {
                        return Err(self.fail(err, cursor));
                    }

                    if len == 0 {
                        digits.clear();
                        log::trace!("record complete: 0 bytes");
                        emit(Vec::new());
                        emitted += 1;
                    } else {
                        self.state = ReaderState::AwaitingPayload {
                            payload: Vec::with_capacity(len.min(MAX_PREALLOC)),
                            remaining: len,
                        };
                    }
                }

                ReaderState::AwaitingPayload { payload, remaining } => {
                    let take = (*remaining).min(chunk.len() - cursor);
                    payload.extend_from_slice(&chunk[cursor..cursor + take]);
                    cursor += take;
                    *remaining -= take;

                    if *remaining == 0 {
                        let record = std::mem::take(payload);
                        self.state = ReaderState::awaiting_length();
                        log::trace!("record complete: {} bytes", record.len());
                        emit(record);
                        emitted += 1;
                    }
                }

                ReaderState::Failed => return Err(DecodeError::ReaderFailed),
            }
        }

        self.consumed += chunk.len() as u64;
        Ok(emitted)
    }

    /// Signal normal completion of the upstream source.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::TruncatedStream`] if a length prefix or payload is
    ///   still incomplete. The reader is terminated.
    /// - [`DecodeError::ReaderFailed`] if the reader already failed.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        let truncation = match &self.state {
            ReaderState::AwaitingLength { digits } if digits.is_empty() => return Ok(()),
            ReaderState::AwaitingLength { digits } => Truncation::Length {
                digits: digits.len(),
            },
            ReaderState::AwaitingPayload { payload, remaining } => Truncation::Payload {
                expected: payload.len() + remaining,
                received: payload.len(),
            },
            ReaderState::Failed => return Err(DecodeError::ReaderFailed),
        };

        log::debug!("stream ended at offset {}: {truncation}", self.consumed);
        self.state = ReaderState::Failed;
        Err(DecodeError::TruncatedStream(truncation))
    }

    /// Record an upstream failure, discarding any partial record.
    ///
    /// Returns the error to hand to the downstream consumer.
    pub fn fail_upstream(&mut self, err: std::io::Error) -> DecodeError {
        log::debug!("upstream failed at offset {}: {err}", self.consumed);
        self.state = ReaderState::Failed;
        DecodeError::Upstream(err)
    }

    /// Return to the initial state, dropping any partial record.
    ///
    /// Used when the same instance is pointed at a fresh stream.
    pub fn reset(&mut self) {
        self.state = ReaderState::awaiting_length();
        self.consumed = 0;
    }

    /// `true` when no partial length and no partial payload are held.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(&self.state, ReaderState::AwaitingLength { digits } if digits.is_empty())
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.state, ReaderState::Failed)
    }

    /// Digits of an unterminated length prefix, or empty.
    #[must_use]
    pub fn pending_length_digits(&self) -> &[u8] {
        match &self.state {
            ReaderState::AwaitingLength { digits } => digits,
            _ => &[],
        }
    }

    /// Payload bytes still needed to complete the current record.
    #[must_use]
    pub fn remaining_payload_bytes(&self) -> usize {
        match &self.state {
            ReaderState::AwaitingPayload { remaining, .. } => *remaining,
            _ => 0,
        }
    }

    /// Payload bytes of the current record received so far.
    #[must_use]
    pub fn buffered_payload_len(&self) -> usize {
        match &self.state {
            ReaderState::AwaitingPayload { payload, .. } => payload.len(),
            _ => 0,
        }
    }

    /// Total bytes accepted from all chunks.
    #[must_use]
    pub fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    fn offset_at(&self, cursor: usize) -> u64 {
        self.consumed + cursor as u64
    }

    fn fail(&mut self, err: DecodeError, cursor: usize) -> DecodeError {
        self.consumed += cursor as u64;
        log::debug!("record reader failed: {err}");
        self.state = ReaderState::Failed;
        err
    }
}
