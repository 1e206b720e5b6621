use std::io;

/// Result type for record stream operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Unified record stream error covering framing corruption, limits and I/O.
///
/// A clean end of stream at a frame boundary is not represented here: the
/// reader reports it as `Ok(None)` and the scanner latches it separately.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Source exhausted inside a payload after a valid length was read.
    #[error("truncated record: expected {expected} bytes, got {actual}")]
    TruncatedRecord { expected: u64, actual: u64 },

    /// Length prefix did not terminate within the 64-bit varint limit.
    #[error("malformed varint: no valid terminator after {consumed} bytes")]
    MalformedVarint { consumed: usize },

    /// Source exhausted inside a length prefix.
    #[error("unexpected end of stream inside varint after {consumed} bytes")]
    UnexpectedEndOfStream { consumed: usize },

    /// Declared record length is above the configured (or addressable) limit.
    #[error("record of {size} bytes exceeds limit of {max} bytes")]
    RecordTooLarge { size: u64, max: u64 },

    /// Rejected options or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Underlying source/sink failure, propagated verbatim.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RecordError {
    /// True when the error means the bytes on the wire are not a valid stream.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            RecordError::TruncatedRecord { .. }
                | RecordError::MalformedVarint { .. }
                | RecordError::UnexpectedEndOfStream { .. }
        )
    }
}
