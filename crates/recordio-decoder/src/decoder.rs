use recordio_wire::{RecordFrame, WireError, decode_length_prefix};

use crate::config::ReaderConfig;
use crate::error::{DecodeError, Truncation};

/// Synchronous RecordIO decoder — parses a complete in-memory stream.
///
/// Use this when the whole stream is already in one buffer (a file read
/// into memory, a test fixture). For chunked input use
/// [`RecordReader`](crate::RecordReader) or one of its drivers. Both
/// paths produce the same payloads and the same error kinds for the same
/// bytes.
///
/// # Example
///
/// ```rust
/// use recordio_decoder::RecordDecoder;
///
/// let records = RecordDecoder::decode(b"3\nfoo0\n3\nbar").unwrap();
/// assert_eq!(records, vec![b"foo".to_vec(), b"".to_vec(), b"bar".to_vec()]);
/// ```
pub struct RecordDecoder;

impl RecordDecoder {
    /// Decode every record in `stream`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MalformedLength`] / [`DecodeError::EmptyLength`]
    ///   for a bad length prefix.
    /// - [`DecodeError::LengthTooLong`] for a digit run past the limit.
    /// - [`DecodeError::LengthOverflow`] for a length beyond `usize`.
    /// - [`DecodeError::TruncatedStream`] if the buffer ends mid-record.
    pub fn decode(stream: &[u8]) -> Result<Vec<Vec<u8>>, DecodeError> {
        Self::decode_with_config(stream, &ReaderConfig::default())
    }

    /// Decode every record in `stream`, applying `config` limits.
    ///
    /// # Errors
    ///
    /// All errors from [`decode`](Self::decode), plus
    /// [`DecodeError::RecordTooLarge`] when a payload exceeds
    /// `max_record_size`.
    pub fn decode_with_config(
        stream: &[u8],
        config: &ReaderConfig,
    ) -> Result<Vec<Vec<u8>>, DecodeError> {
        let mut cursor = 0;
        let mut records = Vec::new();

        while cursor < stream.len() {
            let remaining = &stream[cursor..];

            let digits = remaining.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > config.max_length_digits {
                return Err(DecodeError::LengthTooLong {
                    digits,
                    limit: config.max_length_digits,
                });
            }

            // Size limit applies as soon as the prefix is complete, even
            // if the payload is cut short.
            if let Ok((len, _)) = decode_length_prefix(remaining) {
                config.check_record_size(len)?;
            }

            let (frame, consumed) = RecordFrame::read_from(remaining)
                .map_err(|e| Self::map_wire_error(e, remaining, cursor))?;

            records.push(frame.payload);
            cursor += consumed;
        }

        Ok(records)
    }

    /// Translate a frame error into the stream-level error kinds that
    /// [`RecordReader`](crate::RecordReader) reports.
    fn map_wire_error(err: WireError, remaining: &[u8], base: usize) -> DecodeError {
        match err {
            WireError::UnexpectedEof { .. } => {
                DecodeError::TruncatedStream(Self::truncation_at(remaining))
            }
            WireError::InvalidLengthByte { byte, offset } => DecodeError::MalformedLength {
                byte,
                offset: (base + offset) as u64,
            },
            WireError::EmptyLength { offset } => DecodeError::EmptyLength {
                offset: (base + offset) as u64,
            },
            WireError::LengthOverflow { digits } => DecodeError::LengthOverflow { digits },
        }
    }

    /// Describe where an incomplete trailing record stops.
    fn truncation_at(remaining: &[u8]) -> Truncation {
        match decode_length_prefix(remaining) {
            Ok((expected, prefix_len)) => Truncation::Payload {
                expected,
                received: remaining.len() - prefix_len,
            },
            Err(_) => Truncation::Length {
                digits: remaining.len(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordReader;
    use recordio_encoder::RecordEncoder;

    #[test]
    fn empty_stream_has_no_records() {
        assert!(RecordDecoder::decode(b"").unwrap().is_empty());
    }

    #[test]
    fn decodes_encoder_output() {
        let stream = RecordEncoder::new()
            .add_record(b"{\"type\":\"SUBSCRIBED\"}")
            .add_record(b"")
            .add_record(&[0u8; 1000])
            .encode()
            .unwrap();

        let records = RecordDecoder::decode(&stream).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], b"{\"type\":\"SUBSCRIBED\"}");
        assert!(records[1].is_empty());
        assert_eq!(records[2].len(), 1000);
    }

    #[test]
    fn matches_incremental_reader() {
        let stream = b"5\nalpha4\nbeta0\n5\ngamma";
        let mut reader = RecordReader::new();
        let incremental = reader.consume(stream).unwrap();
        reader.finish().unwrap();

        assert_eq!(RecordDecoder::decode(stream).unwrap(), incremental);
    }

    #[test]
    fn truncated_payload() {
        assert!(matches!(
            RecordDecoder::decode(b"2\nok10\nabc"),
            Err(DecodeError::TruncatedStream(Truncation::Payload {
                expected: 10,
                received: 3
            }))
        ));
    }

    #[test]
    fn truncated_length() {
        assert!(matches!(
            RecordDecoder::decode(b"2\nok12"),
            Err(DecodeError::TruncatedStream(Truncation::Length { digits: 2 }))
        ));
    }

    #[test]
    fn malformed_offset_is_absolute() {
        assert!(matches!(
            RecordDecoder::decode(b"2\nok1a\n"),
            Err(DecodeError::MalformedLength { byte: b'a', offset: 5 })
        ));
    }

    #[test]
    fn empty_length_offset_is_absolute() {
        assert!(matches!(
            RecordDecoder::decode(b"1\nx\n"),
            Err(DecodeError::EmptyLength { offset: 3 })
        ));
    }

    #[test]
    fn config_limits_apply() {
        let config = ReaderConfig::default().with_max_record_size(3);
        assert!(matches!(
            RecordDecoder::decode_with_config(b"3\nabc4\nabcd", &config),
            Err(DecodeError::RecordTooLarge { size: 4, limit: 3 })
        ));

        let config = ReaderConfig::default().with_max_length_digits(2);
        assert!(matches!(
            RecordDecoder::decode_with_config(b"003\nabc", &config),
            Err(DecodeError::LengthTooLong { digits: 3, limit: 2 })
        ));
    }

    #[test]
    fn oversize_record_rejected_before_truncation() {
        let config = ReaderConfig::default().with_max_record_size(3);
        assert!(matches!(
            RecordDecoder::decode_with_config(b"100\nab", &config),
            Err(DecodeError::RecordTooLarge { size: 100, limit: 3 })
        ));
    }

    #[test]
    fn digit_limit_above_twenty() {
        let config = ReaderConfig::default().with_max_length_digits(30);
        let records =
            RecordDecoder::decode_with_config(b"0000000000000000000000005\nhello", &config).unwrap();
        assert_eq!(records, vec![b"hello".to_vec()]);

        let overflow = [b'9'; 25];
        let mut stream = overflow.to_vec();
        stream.extend_from_slice(b"\nx");
        assert!(matches!(
            RecordDecoder::decode_with_config(&stream, &config),
            Err(DecodeError::LengthOverflow { .. })
        ));

        // The configured limit is the one reported.
        let long = [b'0'; 31];
        assert!(matches!(
            RecordDecoder::decode_with_config(&long, &config),
            Err(DecodeError::LengthTooLong { digits: 31, limit: 30 })
        ));
    }

    #[test]
    fn overflow_is_distinct_from_digit_limit() {
        assert!(matches!(
            RecordDecoder::decode(b"99999999999999999999\n"),
            Err(DecodeError::LengthOverflow { digits: 20 })
        ));
    }
}
