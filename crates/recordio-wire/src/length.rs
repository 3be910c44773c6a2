use crate::error::WireError;

/// Length prefix terminator.
pub const NEWLINE: u8 = b'\n';

/// Maximum number of significant decimal digits in a length prefix.
/// `u64::MAX` has 20 digits. Leading zeros do not count.
pub const MAX_LENGTH_DIGITS: usize = 20;

/// Write `len` as an ASCII decimal length prefix followed by `\n`.
///
/// # Returns
///
/// The number of bytes written (digits plus the newline).
///
/// # Wire format examples
///
/// | Length | Encoded bytes  |
/// |--------|----------------|
/// | 0      | `"0\n"`        |
/// | 7      | `"7\n"`        |
/// | 1024   | `"1024\n"`     |
///
/// # Errors
///
/// Returns the writer's error if a write fails.
pub fn write_length_prefix(len: usize, w: &mut impl std::io::Write) -> std::io::Result<usize> {
    let digits = len.to_string();
    w.write_all(digits.as_bytes())?;
    w.write_all(&[NEWLINE])?;
    Ok(digits.len() + 1)
}

/// Parse a run of ASCII digits (without the newline) into a length.
///
/// Leading zeros are accepted and place no bound on the run: `"007"`
/// parses as 7. Callers that want to cap the run length check it
/// themselves.
///
/// # Errors
///
/// - [`WireError::EmptyLength`] if `digits` is empty.
/// - [`WireError::InvalidLengthByte`] if a non-digit byte is present.
/// - [`WireError::LengthOverflow`] if the value overflows `usize`.
pub fn parse_length_digits(digits: &[u8]) -> Result<usize, WireError> {
    if digits.is_empty() {
        return Err(WireError::EmptyLength { offset: 0 });
    }

    let mut value: usize = 0;
    for (i, &byte) in digits.iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(WireError::InvalidLengthByte { byte, offset: i });
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(byte - b'0')))
            .ok_or(WireError::LengthOverflow {
                digits: digits.len(),
            })?;
    }
    Ok(value)
}

/// Decode a complete length prefix (digits plus newline) from the front
/// of `buf`.
///
/// # Returns
///
/// `(length, bytes_consumed)` on success, where `bytes_consumed`
/// includes the newline.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] if no newline is found.
/// - Any error from [`parse_length_digits`], with offsets relative to
///   the start of `buf`.
pub fn decode_length_prefix(buf: &[u8]) -> Result<(usize, usize), WireError> {
    let mut significant = 0;
    for (i, &byte) in buf.iter().enumerate() {
        if byte == NEWLINE {
            if i == 0 {
                return Err(WireError::EmptyLength { offset: 0 });
            }
            let len = parse_length_digits(&buf[..i])?;
            return Ok((len, i + 1));
        }
        if !byte.is_ascii_digit() {
            return Err(WireError::InvalidLengthByte { byte, offset: i });
        }
        if byte != b'0' || significant > 0 {
            significant += 1;
        }
        // Past this many significant digits no value fits.
        if significant > MAX_LENGTH_DIGITS {
            return Err(WireError::LengthOverflow { digits: i + 1 });
        }
    }

    Err(WireError::UnexpectedEof { offset: buf.len() })
}
