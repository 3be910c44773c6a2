/// Errors that can occur while decoding a RecordIO stream.
///
/// Every variant is terminal: once a reader reports one of these it
/// emits no further payloads. The variants separate bad data from a
/// connection that dropped mid-record, so callers can decide whether
/// reopening the stream is worthwhile.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── MalformedLength        ← non-digit, non-newline byte in a length prefix
///   ├── EmptyLength            ← newline with no preceding digits
///   ├── LengthTooLong          ← digit run past max_length_digits
///   ├── LengthOverflow         ← length value beyond usize
///   ├── RecordTooLarge         ← parsed length exceeds max_record_size
///   ├── TruncatedStream        ← upstream ended mid-length or mid-payload
///   ├── Upstream(io::Error)    ← the chunk source itself failed
///   └── ReaderFailed           ← reader used after a terminal error
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A byte outside `0-9` and `\n` appeared where a length prefix was
    /// being accumulated. The stream cannot be resynchronized.
    #[error("malformed length prefix: byte {byte:#04X} at offset {offset}")]
    MalformedLength { byte: u8, offset: u64 },

    /// A newline arrived in length position with no digits before it.
    #[error("empty length prefix at offset {offset}")]
    EmptyLength { offset: u64 },

    /// The length prefix has more digits than the configured limit.
    #[error("length prefix too long: {digits} digits (limit {limit})")]
    LengthTooLong { digits: usize, limit: usize },

    /// The length prefix is within the digit limit but its value does
    /// not fit in a `usize`.
    #[error("length prefix overflows usize: {digits} digits")]
    LengthOverflow { digits: usize },

    /// The declared payload length exceeds the configured record limit.
    #[error("record of {size} bytes exceeds limit of {limit} bytes")]
    RecordTooLarge { size: usize, limit: usize },

    /// The upstream source completed normally in the middle of a record.
    #[error("stream truncated: {0}")]
    TruncatedStream(Truncation),

    /// The upstream chunk source reported an error. Any partially
    /// buffered record was discarded.
    #[error("upstream error: {0}")]
    Upstream(#[from] std::io::Error),

    /// The reader already failed and refuses further input.
    #[error("reader already terminated by an earlier error")]
    ReaderFailed,
}

/// Failure of [`RecordReader::consume`](crate::RecordReader::consume).
///
/// Carries the payloads the chunk completed before the offending byte,
/// in stream order, alongside the terminal error.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ConsumeError {
    pub records: Vec<Vec<u8>>,
    pub error: DecodeError,
}

impl ConsumeError {
    /// Drop the completed payloads, keeping only the error.
    #[must_use]
    pub fn into_error(self) -> DecodeError {
        self.error
    }
}

/// Where a truncated stream stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Truncation {
    /// Inside a length prefix, after `digits` digits and no newline.
    Length { digits: usize },

    /// Inside a payload, after `received` of `expected` bytes.
    Payload { expected: usize, received: usize },
}

impl std::fmt::Display for Truncation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length { digits } => {
                write!(f, "length prefix unterminated after {digits} digits")
            }
            Self::Payload { expected, received } => {
                write!(f, "payload has {received} of {expected} bytes")
            }
        }
    }
}
