/// Errors that can occur while decoding or writing a varint.
#[derive(Debug, thiserror::Error)]
pub enum VarintError {
    /// The source held no bytes at all.
    #[error("varint source is empty")]
    Eof,

    /// The source ended while the continuation bit was still set.
    #[error("varint truncated after {read} bytes")]
    Truncated { read: usize },

    /// The encoding does not fit in 64 bits.
    #[error("varint overflows a 64-bit integer")]
    Overflow,

    /// An I/O error occurred on the underlying stream.
    #[error("varint I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VarintError>;
