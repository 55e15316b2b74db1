use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use wirebin::codec::DEFAULT_MAX_LENGTH;
use wirebin::shape::{Shape, ShapeRegistry};
use wirebin::Endian;

use crate::exit::{shape_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod varint;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a JSON value as the given shape.
    Encode(EncodeArgs),
    /// Decode bytes of the given shape and print them as JSON.
    Decode(DecodeArgs),
    /// Encode or decode a single varint.
    Varint(VarintArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Varint(args) => varint::run(args, format),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum EndianArg {
    Little,
    Big,
}

impl From<EndianArg> for Endian {
    fn from(arg: EndianArg) -> Self {
        match arg {
            EndianArg::Little => Endian::Little,
            EndianArg::Big => Endian::Big,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Shape of the value, e.g. `struct { a: string, b: [u16] }`.
    #[arg(long)]
    pub shape: String,
    /// File of `type Name = shape;` definitions usable in --shape.
    #[arg(long, value_name = "FILE")]
    pub types: Option<PathBuf>,
    /// JSON value to encode.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read the JSON value from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Shape of the encoded value.
    #[arg(long)]
    pub shape: String,
    /// File of `type Name = shape;` definitions usable in --shape.
    #[arg(long, value_name = "FILE")]
    pub types: Option<PathBuf>,
    /// Encoded bytes as hex; whitespace is ignored.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub hex: Option<String>,
    /// Read the encoded bytes from a binary file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Largest length prefix accepted while decoding.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,
}

#[derive(Args, Debug)]
pub struct VarintArgs {
    #[command(subcommand)]
    pub command: VarintCommand,
}

#[derive(Subcommand, Debug)]
pub enum VarintCommand {
    /// Encode an unsigned integer.
    Encode {
        /// Value to encode.
        value: u64,
    },
    /// Decode a varint given as hex.
    Decode {
        /// Encoded bytes as hex.
        hex: String,
    },
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Resolve shape text, with named shapes from an optional definitions file.
pub(crate) fn resolve_shape(text: &str, types: Option<&Path>) -> CliResult<Shape> {
    let registry = match types {
        Some(path) => ShapeRegistry::from_file(path)
            .map_err(|err| shape_error(&format!("failed loading {}", path.display()), err))?,
        None => ShapeRegistry::new(),
    };
    registry
        .resolve(text)
        .map_err(|err| shape_error("invalid shape", err))
}

pub(crate) fn parse_hex(flag: &str, text: &str) -> CliResult<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    hex::decode(&compact)
        .map_err(|err| CliError::new(USAGE, format!("{flag} is not valid hex: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_ignores_whitespace() {
        assert_eq!(parse_hex("--hex", "01 ab\n0f").unwrap(), [0x01, 0xab, 0x0f]);
        assert_eq!(parse_hex("--hex", "zz").unwrap_err().code, USAGE);
    }

    #[test]
    fn shape_without_types_file() {
        assert_eq!(resolve_shape("[u8]", None).unwrap(), Shape::seq(Shape::U8));
        assert_eq!(resolve_shape("Celsius", None).unwrap_err().code, USAGE);
    }

    #[test]
    fn endian_arg_converts() {
        assert_eq!(Endian::from(EndianArg::Big), Endian::Big);
        assert_eq!(Endian::from(EndianArg::Little), Endian::Little);
    }
}
