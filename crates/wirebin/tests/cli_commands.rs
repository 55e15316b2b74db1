#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

const S0_SHAPE: &str = "struct { a: string, b: string, c: i16 }";

fn wirebin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wirebin"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("wirebin should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn unique_temp_file(tag: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "wirebin-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::write(&path, content).expect("temp file should be writable");
    path
}

#[test]
fn encode_struct_as_hex() {
    let output = wirebin(&[
        "--endian",
        "little",
        "--format",
        "hex",
        "encode",
        "--shape",
        S0_SHAPE,
        "--json",
        r#"{"a":"A","b":"B","c":1}"#,
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "014101420100");
}

#[test]
fn big_endian_flips_fixed_scalars() {
    let output = wirebin(&[
        "--endian",
        "big",
        "--format",
        "hex",
        "encode",
        "--shape",
        S0_SHAPE,
        "--json",
        r#"{"a":"A","b":"B","c":1}"#,
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "014101420001");
}

#[test]
fn encode_json_output_reports_length() {
    let output = wirebin(&[
        "--format",
        "json",
        "encode",
        "--shape",
        "[u8]",
        "--json",
        "[7, 8]",
    ]);
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc["len"], 3);
    assert_eq!(doc["hex"], "020708");
    assert_eq!(doc["shape"], "[u8]");
}

#[test]
fn raw_output_is_unmodified_bytes() {
    let output = wirebin(&[
        "--format", "raw", "encode", "--shape", "string", "--json", r#""hi""#,
    ]);
    assert!(output.status.success());
    assert_eq!(output.stdout, [0x02, b'h', b'i']);
}

#[test]
fn decode_struct_to_json() {
    let output = wirebin(&[
        "--endian",
        "little",
        "--format",
        "json",
        "decode",
        "--shape",
        S0_SHAPE,
        "--hex",
        "01 41 01 42 01 00",
    ]);
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc, serde_json::json!({"a": "A", "b": "B", "c": 1}));
}

#[test]
fn decode_binary_file() {
    let path = unique_temp_file("bin", "\u{3}abc");
    let output = wirebin(&[
        "--format",
        "json",
        "decode",
        "--shape",
        "bytes",
        "--file",
        path.to_str().unwrap(),
    ]);
    let _ = std::fs::remove_file(&path);
    assert!(output.status.success());
    assert_eq!(stdout(&output), r#""616263""#);
}

#[test]
fn named_shapes_from_types_file() {
    let types = unique_temp_file(
        "types",
        "# temperatures\ntype Celsius = f64;\ntype Log = [Celsius];\n",
    );
    let output = wirebin(&[
        "--endian",
        "little",
        "--format",
        "hex",
        "encode",
        "--types",
        types.to_str().unwrap(),
        "--shape",
        "Log",
        "--json",
        "[1.5]",
    ]);
    let _ = std::fs::remove_file(&types);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "01000000000000f83f");
}

#[test]
fn decoded_json_feeds_back_into_encode() {
    let shape = "struct { z: {u16: bool}, a: u8 }";
    let decoded = wirebin(&["--format", "json", "decode", "--shape", shape, "--hex", "0007"]);
    assert!(decoded.status.success());
    let text = stdout(&decoded);
    assert_eq!(text, r#"{"z":{},"a":7}"#);

    let encoded = wirebin(&["--format", "hex", "encode", "--shape", shape, "--json", &text]);
    assert!(encoded.status.success());
    assert_eq!(stdout(&encoded), "0007");
}

#[test]
fn unknown_shape_exits_64() {
    let output = wirebin(&["encode", "--shape", "chan", "--json", "1"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported type chan"));
}

#[test]
fn invalid_json_exits_64() {
    let output = wirebin(&["encode", "--shape", "u8", "--json", "{"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn value_not_fitting_shape_exits_60() {
    let output = wirebin(&["encode", "--shape", "u8", "--json", "300"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn truncated_input_exits_60() {
    let output = wirebin(&["decode", "--shape", S0_SHAPE, "--hex", "014101"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn oversized_length_prefix_exits_60() {
    let output = wirebin(&[
        "decode",
        "--shape",
        "bytes",
        "--max-length",
        "2",
        "--hex",
        "03616263",
    ]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn varint_encode_and_decode() {
    let output = wirebin(&["--format", "hex", "varint", "encode", "300"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ac02");

    let output = wirebin(&["--format", "json", "varint", "decode", "ac02"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), r#"{"value":300,"len":2}"#);
}

#[test]
fn unterminated_varint_exits_60() {
    let output = wirebin(&["varint", "decode", "8080"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn version_reports_package_version() {
    let output = wirebin(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("wirebin {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn extended_version_as_json() {
    let output = wirebin(&["--format", "json", "--endian", "big", "version", "--extended"]);
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc["name"], "wirebin");
    assert_eq!(doc["default_endian"], "big");
}
