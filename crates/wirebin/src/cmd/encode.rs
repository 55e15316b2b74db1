use std::fs;

use tracing::debug;
use wirebin::shape::{marshal_value, Value};
use wirebin::CodecConfig;

use crate::cmd::{resolve_shape, EncodeArgs};
use crate::exit::{io_error, shape_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_bytes, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let shape = resolve_shape(&args.shape, args.types.as_deref())?;
    let input = read_input(&args)?;
    let value = Value::from_json(&shape, &input)
        .map_err(|err| shape_error("input does not fit shape", err))?;

    let config = CodecConfig::default();
    let bytes = marshal_value(&shape, &value, config)
        .map_err(|err| shape_error("encode failed", err))?;
    debug!(shape = %shape, len = bytes.len(), endian = ?config.endian, "encoded value");

    print_bytes(&args.shape, &bytes, format)?;
    Ok(SUCCESS)
}

fn read_input(args: &EncodeArgs) -> CliResult<serde_json::Value> {
    let text = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?,
        (None, None) => return Err(CliError::new(USAGE, "one of --json or --file is required")),
    };
    serde_json::from_str(&text)
        .map_err(|err| CliError::new(USAGE, format!("input is not valid JSON: {err}")))
}
