use std::collections::BTreeMap;

use serde_json::json;
use wirebin_codec::{marshal_with_config, wire_newtype, wire_struct, CodecConfig, Complex64, Endian};
use wirebin_shape::{marshal_value, unmarshal_value, Shape, ShapeRegistry, Value};

#[derive(Debug, Default, PartialEq)]
struct Celsius(f64);
wire_newtype!(Celsius);

#[derive(Debug, Default, PartialEq)]
struct Reading {
    station: String,
    at: isize,
    temp: Celsius,
    flags: [bool; 2],
    _scratch: Vec<u8>,
    phase: Complex64,
    notes: BTreeMap<String, u16>,
    raw: Vec<u8>,
}
wire_struct!(Reading { station, at, temp, flags, phase, notes, raw } skip { _scratch });

const DEFINITIONS: &str = "
type Celsius = f64;
type Reading = struct {
    station: string,
    at: int,
    temp: Celsius,
    flags: [bool; 2],
    _: bytes,
    phase: c128,
    notes: {string: u16},
    raw: bytes,
};
";

fn configs() -> [CodecConfig; 2] {
    [Endian::Little, Endian::Big].map(|endian| CodecConfig {
        endian,
        ..CodecConfig::default()
    })
}

fn reading() -> Reading {
    Reading {
        station: "north".into(),
        at: -7,
        temp: Celsius(21.5),
        flags: [true, false],
        _scratch: vec![1, 2, 3],
        phase: Complex64::new(0.5, -0.25),
        notes: BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 513)]),
        raw: vec![0xde, 0xad],
    }
}

fn reading_json() -> serde_json::Value {
    json!({
        "station": "north",
        "at": -7,
        "temp": 21.5,
        "flags": [true, false],
        "phase": [0.5, -0.25],
        "notes": {"a": 1, "b": 513},
        "raw": "dead",
    })
}

fn reading_shape() -> Shape {
    let mut registry = ShapeRegistry::new();
    registry.load_definitions(DEFINITIONS).unwrap();
    registry.resolve("Reading").unwrap()
}

#[test]
fn dynamic_and_static_paths_agree() {
    let shape = reading_shape();
    let value = Value::from_json(&shape, &reading_json()).unwrap();

    for config in configs() {
        let static_wire = marshal_with_config(&reading(), config).unwrap();
        let dynamic_wire = marshal_value(&shape, &value, config).unwrap();
        assert_eq!(static_wire, dynamic_wire, "{:?}", config.endian);

        let decoded = unmarshal_value(&shape, &static_wire, config).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(decoded.to_json(), reading_json());
    }
}

#[test]
fn alias_encodes_like_its_base() {
    let mut registry = ShapeRegistry::new();
    registry.define("Celsius", "f64").unwrap();
    let alias = registry.resolve("Celsius").unwrap();

    let config = CodecConfig::default();
    assert_eq!(
        marshal_value(&alias, &Value::F64(3.0), config).unwrap(),
        marshal_with_config(&Celsius(3.0), config).unwrap()
    );
}

#[test]
fn nested_sequences_of_records() {
    let shape: Shape = "[struct { id: u32, names: [string] }]".parse().unwrap();
    let input = json!([
        {"id": 1, "names": ["a", "bc"]},
        {"id": 2, "names": []},
    ]);
    let value = Value::from_json(&shape, &input).unwrap();
    let config = CodecConfig {
        endian: Endian::Little,
        ..CodecConfig::default()
    };
    let wire = marshal_value(&shape, &value, config).unwrap();
    assert_eq!(
        wire,
        [2, 1, 0, 0, 0, 2, 1, b'a', 2, b'b', b'c', 2, 0, 0, 0, 0]
    );
    assert_eq!(unmarshal_value(&shape, &wire, config).unwrap().to_json(), input);
}
