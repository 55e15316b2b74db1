use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;
use wirebin_codec::{
    marshal, unmarshal, wire_newtype, wire_struct, BinaryMarshaler, BinaryUnmarshaler, BoxError,
    Complex64, Decoder, Encoder,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Celsius(f64);
wire_newtype!(Celsius);

#[derive(Debug, Default, Clone, PartialEq)]
struct Reading {
    sensor: String,
    seq: u64,
    offset: isize,
    temp: Celsius,
    raw: Vec<u8>,
    flags: [bool; 3],
    phase: Complex64,
    labels: BTreeMap<String, i16>,
    history: Vec<i32>,
}
wire_struct!(Reading {
    sensor,
    seq,
    offset,
    temp,
    raw,
    flags,
    phase,
    labels,
    history,
});

/// Encodes as its decimal text, to exercise the custom path inside a container.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
struct Decimal(u32);

impl BinaryMarshaler for Decimal {
    fn marshal_binary(&self) -> Result<Vec<u8>, BoxError> {
        Ok(self.0.to_string().into_bytes())
    }
}

impl BinaryUnmarshaler for Decimal {
    fn unmarshal_binary(data: &[u8]) -> Result<Self, BoxError> {
        Ok(Decimal(std::str::from_utf8(data)?.parse()?))
    }
}
wirebin_codec::wire_custom!(Decimal);

fn reading() -> impl Strategy<Value = Reading> {
    (
        ".{0,12}",
        any::<u64>(),
        any::<isize>(),
        -1000.0f64..1000.0,
        prop::collection::vec(any::<u8>(), 0..64),
        any::<[bool; 3]>(),
        (-1.0f64..1.0, -1.0f64..1.0),
        prop::collection::btree_map("[a-z]{1,4}", any::<i16>(), 0..6),
        prop::collection::vec(any::<i32>(), 0..16),
    )
        .prop_map(
            |(sensor, seq, offset, temp, raw, flags, (re, im), labels, history)| Reading {
                sensor,
                seq,
                offset,
                temp: Celsius(temp),
                raw,
                flags,
                phase: Complex64::new(re, im),
                labels,
                history,
            },
        )
}

proptest! {
    #[test]
    fn records_round_trip(value in reading()) {
        let wire = marshal(&value).unwrap();
        let mut back = Reading::default();
        unmarshal(&wire, &mut back).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn hash_maps_keep_associations(map in prop::collection::hash_map(any::<u32>(), ".{0,8}", 0..16)) {
        let keyed: HashMap<Decimal, String> =
            map.iter().map(|(k, v)| (Decimal(*k), v.clone())).collect();
        let wire = marshal(&keyed).unwrap();
        let mut back = HashMap::new();
        unmarshal(&wire, &mut back).unwrap();
        prop_assert_eq!(back, keyed);
    }

    #[test]
    fn truncated_input_never_succeeds(value in reading(), cut in 1usize..8) {
        let wire = marshal(&value).unwrap();
        let cut = cut.min(wire.len());
        let mut back = Reading::default();
        prop_assert!(unmarshal(&wire[..wire.len() - cut], &mut back).is_err());
    }
}

#[test]
fn streaming_encoder_and_decoder_share_one_stream() {
    let mut enc = Encoder::new(Vec::new());
    enc.encode("first").unwrap();
    enc.encode(&vec![Decimal(7), Decimal(1234)]).unwrap();
    enc.encode(&true).unwrap();
    let wire = enc.into_inner();

    let mut dec = Decoder::new(wire.as_slice());
    let mut text = String::new();
    let mut numbers: Vec<Decimal> = Vec::new();
    let mut flag = false;
    dec.decode(&mut text).unwrap();
    dec.decode(&mut numbers).unwrap();
    dec.decode(&mut flag).unwrap();

    assert_eq!(text, "first");
    assert_eq!(numbers, [Decimal(7), Decimal(1234)]);
    assert!(flag);
}

#[test]
fn custom_elements_are_individually_prefixed() {
    let wire = marshal(&vec![Decimal(7), Decimal(42)]).unwrap();
    assert_eq!(wire, [0x02, 0x01, b'7', 0x02, b'4', b'2']);
}
