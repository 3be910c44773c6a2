/// Errors that can occur while encoding a RecordIO stream.
///
/// ```text
///   EncodeError
///   ├── RecordTooLarge     ← payload exceeds the configured limit
///   └── Io(std::io::Error) ← from underlying I/O writes
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("record {index} exceeds maximum size ({size} bytes, limit {limit})")]
    RecordTooLarge {
        index: usize,
        size: usize,
        limit: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
