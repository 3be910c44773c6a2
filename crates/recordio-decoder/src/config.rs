use recordio_wire::MAX_LENGTH_DIGITS;

/// Limits applied by a [`RecordReader`](crate::RecordReader).
///
/// ```text
/// ┌───────────────────┬──────────────────────────────────────────────┐
/// │ Field             │ Purpose                                      │
/// ├───────────────────┼──────────────────────────────────────────────┤
/// │ max_length_digits │ Longest accepted digit run (default 20)      │
/// │ max_record_size   │ Largest accepted payload (default unlimited) │
/// └───────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Both limits are checked while the length prefix is being read, so an
/// oversized record is rejected before any of its payload is buffered.
/// Leading zeros in a length prefix are accepted and count towards
/// `max_length_digits`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    pub max_length_digits: usize,
    pub max_record_size: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_length_digits: MAX_LENGTH_DIGITS,
            max_record_size: None,
        }
    }
}

impl ReaderConfig {
    #[must_use]
    pub fn with_max_length_digits(mut self, digits: usize) -> Self {
        self.max_length_digits = digits;
        self
    }

    #[must_use]
    pub fn with_max_record_size(mut self, limit: usize) -> Self {
        self.max_record_size = Some(limit);
        self
    }

    /// Check a parsed length against `max_record_size`.
    pub(crate) fn check_record_size(&self, size: usize) -> Result<(), crate::DecodeError> {
        match self.max_record_size {
            Some(limit) if size > limit => Err(crate::DecodeError::RecordTooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited_size() {
        let config = ReaderConfig::default();
        assert_eq!(config.max_length_digits, 20);
        assert_eq!(config.max_record_size, None);
        assert!(config.check_record_size(usize::MAX).is_ok());
    }

    #[test]
    fn record_limit_is_inclusive() {
        let config = ReaderConfig::default().with_max_record_size(10);
        assert!(config.check_record_size(10).is_ok());
        assert!(matches!(
            config.check_record_size(11),
            Err(crate::DecodeError::RecordTooLarge { size: 11, limit: 10 })
        ));
    }
}
