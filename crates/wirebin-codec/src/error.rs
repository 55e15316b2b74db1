use wirebin_varint::VarintError;

/// Error type returned by custom marshalers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while encoding or decoding a value.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The sink or source failed.
    #[error("codec I/O error: {0}")]
    Io(std::io::Error),

    /// The source ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A length prefix could not be decoded.
    #[error("malformed varint: {0}")]
    Varint(VarintError),

    /// A fixed-length target disagrees with the encoded element count.
    #[error("encoded size {encoded} != real size {expected}")]
    LengthMismatch { encoded: u64, expected: usize },

    /// A type's own marshaler or unmarshaler failed.
    #[error("custom encoding failed: {0}")]
    Custom(#[source] BoxError),

    /// A length prefix exceeds the configured maximum.
    #[error("length prefix too large ({len}, max {max})")]
    LengthTooLarge { len: u64, max: usize },

    /// A widened native integer does not fit the platform width.
    #[error("value {value} does not fit in {target}")]
    IntegerOverflow { value: i128, target: &'static str },

    /// Decoded text is not UTF-8.
    #[error("text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(err)
        }
    }
}

impl From<VarintError> for CodecError {
    fn from(err: VarintError) -> Self {
        match err {
            VarintError::Eof => Self::UnexpectedEof,
            VarintError::Io(io) => Self::from(io),
            other => Self::Varint(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_eof_becomes_unexpected_eof() {
        let err = CodecError::from(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        assert!(matches!(err, CodecError::UnexpectedEof));

        let err = CodecError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn varint_errors_are_classified() {
        assert!(matches!(
            CodecError::from(VarintError::Eof),
            CodecError::UnexpectedEof
        ));
        assert!(matches!(
            CodecError::from(VarintError::Truncated { read: 3 }),
            CodecError::Varint(VarintError::Truncated { read: 3 })
        ));
        assert!(matches!(
            CodecError::from(VarintError::Overflow),
            CodecError::Varint(VarintError::Overflow)
        ));
    }

    #[test]
    fn length_mismatch_message() {
        let err = CodecError::LengthMismatch {
            encoded: 3,
            expected: 2,
        };
        assert_eq!(err.to_string(), "encoded size 3 != real size 2");
    }
}
