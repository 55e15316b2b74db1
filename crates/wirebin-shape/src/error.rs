use wirebin_codec::CodecError;

/// Errors that can occur while parsing shapes or moving dynamic values.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// The shape text is malformed.
    #[error("shape syntax error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// The name matches no built-in kind and no registered shape.
    #[error("unsupported type {0}")]
    UnsupportedType(String),

    /// A registry already holds a shape under this name.
    #[error("shape {0} is already defined")]
    Redefined(String),

    /// The shape nests deeper than the configured limit.
    #[error("shape nesting deeper than {max}")]
    TooDeep { max: usize },

    /// A definitions file could not be read.
    #[error("failed to load shape definitions: {0}")]
    LoadFailed(String),

    /// The registry is full.
    #[error("too many shape definitions (max {max})")]
    TooManyDefinitions { max: usize },

    /// A dynamic value does not fit the shape it is encoded with.
    #[error("value does not match shape: expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    /// JSON input cannot be converted to a value of the shape.
    #[error("invalid JSON for {shape}: {message}")]
    Json { shape: String, message: String },

    /// Encoding or decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
