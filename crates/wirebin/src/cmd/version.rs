use serde::Serialize;
use wirebin::{default_endian, Endian};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    target: &'static str,
    target_os: &'static str,
    target_arch: &'static str,
    default_endian: &'static str,
    shape: bool,
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    if !args.extended {
        println!("wirebin {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let info = VersionInfo {
        name: "wirebin",
        version: env!("CARGO_PKG_VERSION"),
        target: option_env!("WIREBIN_BUILD_TARGET").unwrap_or("unknown"),
        target_os: std::env::consts::OS,
        target_arch: std::env::consts::ARCH,
        default_endian: match default_endian() {
            Endian::Little => "little",
            Endian::Big => "big",
        },
        shape: cfg!(feature = "shape"),
    };

    if format == OutputFormat::Json {
        return print_json(&info).map(|()| SUCCESS);
    }
    println!("name: {}", info.name);
    println!("version: {}", info.version);
    println!("target: {}", info.target);
    println!("target_os: {}", info.target_os);
    println!("target_arch: {}", info.target_arch);
    println!("default_endian: {}", info.default_endian);
    println!("features: shape={}, cli=true", info.shape);
    Ok(SUCCESS)
}
