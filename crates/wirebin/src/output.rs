use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::exit::{io_error, CliError, CliResult, USAGE};

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per line.
    Json,
    /// Human-readable text.
    Pretty,
    /// Lowercase hex of the produced bytes.
    Hex,
    /// The produced bytes, unmodified.
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct BytesOutput<'a> {
    shape: &'a str,
    len: usize,
    hex: String,
}

/// Print bytes produced by an encoding command.
pub fn print_bytes(label: &str, bytes: &[u8], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let out = BytesOutput {
                shape: label,
                len: bytes.len(),
                hex: hex::encode(bytes),
            };
            print_json(&out)
        }
        OutputFormat::Pretty => {
            println!("{label} ({} bytes): {}", bytes.len(), spaced_hex(bytes));
            Ok(())
        }
        OutputFormat::Hex => {
            println!("{}", hex::encode(bytes));
            Ok(())
        }
        OutputFormat::Raw => print_raw(bytes),
    }
}

/// Print a JSON document produced by a decoding command.
pub fn print_value(value: &serde_json::Value, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Pretty => {
            let text = serde_json::to_string_pretty(value)
                .map_err(|err| CliError::new(crate::exit::INTERNAL, err.to_string()))?;
            println!("{text}");
            Ok(())
        }
        OutputFormat::Hex | OutputFormat::Raw => Err(CliError::new(
            USAGE,
            "decoded values support --format json or pretty",
        )),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string(value)
        .map_err(|err| CliError::new(crate::exit::INTERNAL, err.to_string()))?;
    println!("{text}");
    Ok(())
}

pub fn print_raw(data: &[u8]) -> CliResult<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(data)
        .and_then(|()| out.flush())
        .map_err(|err| io_error("failed writing stdout", err))
}

fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
