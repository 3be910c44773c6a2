/// Errors raised by the RecordIO wire primitives.
///
/// These cover framing problems found while parsing a complete,
/// in-memory buffer. The incremental reader in `recordio-decoder` has
/// its own error type that adds stream-level conditions (truncation,
/// upstream failure) on top of these.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete length prefix or payload was read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A byte other than `0-9` or `\n` appeared in a length prefix.
    #[error("invalid byte {byte:#04X} in length prefix at offset {offset}")]
    InvalidLengthByte { byte: u8, offset: usize },

    /// A newline arrived before any length digit.
    #[error("empty length prefix at offset {offset}")]
    EmptyLength { offset: usize },

    /// The length value does not fit in a `usize`.
    #[error("length prefix overflows usize: {digits} digits")]
    LengthOverflow { digits: usize },
}
