use serde::Serialize;
use tracing::debug;
use wirebin::varint::{decode, encode, MAX_VARINT_LEN};

use crate::cmd::{parse_hex, VarintArgs, VarintCommand};
use crate::exit::{varint_error, CliResult, SUCCESS};
use crate::output::{print_bytes, print_json, OutputFormat};

#[derive(Serialize)]
struct DecodedVarint {
    value: u64,
    len: usize,
}

pub fn run(args: VarintArgs, format: OutputFormat) -> CliResult<i32> {
    match args.command {
        VarintCommand::Encode { value } => {
            let mut buf = [0u8; MAX_VARINT_LEN];
            let len = encode(value, &mut buf);
            print_bytes(&value.to_string(), &buf[..len], format)?;
        }
        VarintCommand::Decode { hex } => {
            let bytes = parse_hex("varint", &hex)?;
            let (value, len) = decode(&bytes).map_err(|err| varint_error("invalid varint", err))?;
            if len < bytes.len() {
                debug!(len, available = bytes.len(), "ignoring bytes after varint");
            }
            match format {
                OutputFormat::Json => print_json(&DecodedVarint { value, len })?,
                OutputFormat::Pretty => println!("{value} ({len} bytes)"),
                OutputFormat::Hex | OutputFormat::Raw => println!("{value}"),
            }
        }
    }
    Ok(SUCCESS)
}
