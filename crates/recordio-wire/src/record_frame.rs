use crate::error::WireError;
use crate::length::{decode_length_prefix, write_length_prefix};

/// Record frame — the wire envelope around every payload.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ length       (ASCII decimal digits, 1+ bytes)    │
/// │ terminator   ('\n', 1 byte)                      │
/// │ payload      [length bytes]                      │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// Frames are concatenated with nothing in between: the byte after a
/// payload's last byte is the first digit of the next length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordFrame {
    /// The opaque payload bytes.
    pub payload: Vec<u8>,
}

impl RecordFrame {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Number of bytes this frame occupies on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let len = self.payload.len();
        let mut digits = 1;
        let mut rest = len / 10;
        while rest > 0 {
            digits += 1;
            rest /= 10;
        }
        digits + 1 + len
    }

    /// Write this frame to the provided writer.
    ///
    /// # Returns
    ///
    /// Total number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns the writer's error if a write fails.
    pub fn write_to(&self, w: &mut impl std::io::Write) -> std::io::Result<usize> {
        let n = write_length_prefix(self.payload.len(), w)?;
        w.write_all(&self.payload)?;
        Ok(n + self.payload.len())
    }

    /// Read one frame from the front of a complete byte slice.
    ///
    /// # Returns
    ///
    /// `(frame, bytes_consumed)`.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the slice ends inside the length
    ///   prefix or the payload.
    /// - [`WireError::InvalidLengthByte`], [`WireError::EmptyLength`] or
    ///   [`WireError::LengthOverflow`] for a malformed length prefix.
    pub fn read_from(buf: &[u8]) -> Result<(Self, usize), WireError> {
        let (len, cursor) = decode_length_prefix(buf)?;

        let end = cursor
            .checked_add(len)
            .ok_or(WireError::UnexpectedEof { offset: buf.len() })?;
        if buf.len() < end {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        Ok((Self::new(&buf[cursor..end]), end))
    }
}
