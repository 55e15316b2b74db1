use std::fs;

use tracing::debug;
use wirebin::shape::unmarshal_value;
use wirebin::CodecConfig;

use crate::cmd::{parse_hex, resolve_shape, DecodeArgs};
use crate::exit::{io_error, shape_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_value, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let shape = resolve_shape(&args.shape, args.types.as_deref())?;
    let bytes = read_input(&args)?;

    let config = CodecConfig {
        max_length: args.max_length,
        ..CodecConfig::default()
    };
    let value = unmarshal_value(&shape, &bytes, config)
        .map_err(|err| shape_error("decode failed", err))?;
    debug!(shape = %shape, len = bytes.len(), endian = ?config.endian, "decoded value");

    print_value(&value.to_json(), format)?;
    Ok(SUCCESS)
}

fn read_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    match (&args.hex, &args.file) {
        (Some(hex), _) => parse_hex("--hex", hex),
        (None, Some(path)) => fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
        (None, None) => Err(CliError::new(USAGE, "one of --hex or --file is required")),
    }
}
