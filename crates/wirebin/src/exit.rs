use std::fmt;
use std::io;

use wirebin::codec::CodecError;
use wirebin::shape::ShapeError;
use wirebin::varint::VarintError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn varint_error(context: &str, err: VarintError) -> CliError {
    match err {
        VarintError::Io(source) => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::Io(source) => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn shape_error(context: &str, err: ShapeError) -> CliError {
    match err {
        ShapeError::Codec(inner) => codec_error(context, inner),
        ShapeError::Mismatch { .. } | ShapeError::Json { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        ShapeError::LoadFailed(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        ShapeError::Parse { .. }
        | ShapeError::UnsupportedType(_)
        | ShapeError::Redefined(_)
        | ShapeError::TooDeep { .. }
        | ShapeError::TooManyDefinitions { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
    }
}
