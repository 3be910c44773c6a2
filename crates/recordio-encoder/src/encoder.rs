use recordio_wire::RecordFrame;

use crate::error::EncodeError;

/// RecordIO encoder — builds a length-prefixed byte stream from payloads.
///
/// Payloads are appended with [`add_record`](Self::add_record) and
/// serialized in insertion order by [`encode`](Self::encode) or
/// [`write_to`](Self::write_to).
///
/// # Usage
///
/// ```rust
/// use recordio_encoder::RecordEncoder;
///
/// let stream = RecordEncoder::new()
///     .add_record(b"{\"type\":\"SUBSCRIBED\"}")
///     .add_record(b"{\"type\":\"HEARTBEAT\"}")
///     .encode()
///     .unwrap();
///
/// assert!(stream.starts_with(b"21\n{"));
/// ```
///
/// # Output layout
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────┐
/// │ "21\n"       │ Record 0 length prefix                   │
/// │ [21 bytes]   │ Record 0 payload                         │
/// │ "20\n"       │ Record 1 length prefix                   │
/// │ [20 bytes]   │ Record 1 payload                         │
/// └──────────────┴──────────────────────────────────────────┘
/// ```
///
/// An encoder with no records produces an empty stream, which is a
/// valid RecordIO stream with zero records.
#[derive(Clone, Debug, Default)]
pub struct RecordEncoder {
    frames: Vec<RecordFrame>,
    /// Per-record payload limit checked at encode time.
    max_record_size: Option<usize>,
}

impl RecordEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject payloads larger than `limit` bytes when encoding.
    pub fn with_max_record_size(&mut self, limit: usize) -> &mut Self {
        self.max_record_size = Some(limit);
        self
    }

    /// Append one payload.
    pub fn add_record(&mut self, payload: &[u8]) -> &mut Self {
        self.frames.push(RecordFrame::new(payload));
        self
    }

    /// Append every payload yielded by `payloads`, in order.
    pub fn add_records<I, P>(&mut self, payloads: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.frames
            .extend(payloads.into_iter().map(|p| RecordFrame::new(p.as_ref())));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize all records into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::RecordTooLarge`] if a payload exceeds the
    /// configured limit.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.check_limits()?;
        let total = self.frames.iter().map(RecordFrame::encoded_len).sum();
        let mut buf = Vec::with_capacity(total);
        self.write_frames(&mut buf)?;
        Ok(buf)
    }

    /// Serialize all records into `w`.
    ///
    /// # Returns
    ///
    /// Total number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::RecordTooLarge`] before writing anything if a
    /// payload exceeds the limit, or [`EncodeError::Io`] if the writer
    /// fails.
    pub fn write_to(&self, w: &mut impl std::io::Write) -> Result<usize, EncodeError> {
        self.check_limits()?;
        self.write_frames(w)
    }

    fn check_limits(&self) -> Result<(), EncodeError> {
        let Some(limit) = self.max_record_size else {
            return Ok(());
        };
        match self
            .frames
            .iter()
            .position(|frame| frame.payload.len() > limit)
        {
            Some(index) => Err(EncodeError::RecordTooLarge {
                index,
                size: self.frames[index].payload.len(),
                limit,
            }),
            None => Ok(()),
        }
    }

    fn write_frames(&self, w: &mut impl std::io::Write) -> Result<usize, EncodeError> {
        let mut written = 0;
        for frame in &self.frames {
            written += frame.write_to(w)?;
        }
        log::debug!("encoded {} records ({written} bytes)", self.frames.len());
        Ok(written)
    }
}
