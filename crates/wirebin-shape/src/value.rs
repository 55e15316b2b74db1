use std::collections::HashMap;
use std::io::{Read, Write};

use wirebin_codec::{CodecConfig, Complex32, Complex64, Decoder, Encoder};

use crate::error::{Result, ShapeError};
use crate::shape::Shape;

/// Data held against a [`Shape`].
///
/// Fixed-length arrays use [`Value::Seq`]; the shape carries the length.
/// Struct values list only the fields that appear on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    C64(Complex32),
    C128(Complex64),
    Bytes(Vec<u8>),
    Str(String),
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// Short description used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::C64(_) => "c64",
            Value::C128(_) => "c128",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }
}

fn mismatch(shape: &Shape, found: impl Into<String>) -> ShapeError {
    ShapeError::Mismatch {
        expected: shape.to_string(),
        found: found.into(),
    }
}

/// Write `value` laid out as `shape`.
pub fn encode_value<W: Write>(enc: &mut Encoder<W>, shape: &Shape, value: &Value) -> Result<()> {
    match (shape, value) {
        (Shape::Bool, Value::Bool(v)) => enc.write_bool(*v)?,
        (Shape::Int, Value::Int(v)) | (Shape::I64, Value::I64(v)) => enc.write_i64(*v)?,
        (Shape::Uint, Value::Uint(v)) | (Shape::U64, Value::U64(v)) => enc.write_u64(*v)?,
        (Shape::I8, Value::I8(v)) => enc.write_i8(*v)?,
        (Shape::I16, Value::I16(v)) => enc.write_i16(*v)?,
        (Shape::I32, Value::I32(v)) => enc.write_i32(*v)?,
        (Shape::U8, Value::U8(v)) => enc.write_u8(*v)?,
        (Shape::U16, Value::U16(v)) => enc.write_u16(*v)?,
        (Shape::U32, Value::U32(v)) => enc.write_u32(*v)?,
        (Shape::F32, Value::F32(v)) => enc.write_f32(*v)?,
        (Shape::F64, Value::F64(v)) => enc.write_f64(*v)?,
        (Shape::C64, Value::C64(v)) => enc.write_complex32(*v)?,
        (Shape::C128, Value::C128(v)) => enc.write_complex64(*v)?,
        (Shape::Bytes, Value::Bytes(v)) => enc.write_blob(v)?,
        (Shape::Str, Value::Str(v)) => enc.write_blob(v.as_bytes())?,
        (Shape::Seq(elem), Value::Seq(items)) => {
            enc.write_len(items.len())?;
            for item in items {
                encode_value(enc, elem, item)?;
            }
        }
        (Shape::Array(len, elem), Value::Seq(items)) => {
            if items.len() != *len {
                return Err(mismatch(shape, format!("sequence of {}", items.len())));
            }
            enc.write_len(*len)?;
            for item in items {
                encode_value(enc, elem, item)?;
            }
        }
        (Shape::Map(key_shape, value_shape), Value::Map(pairs)) => {
            enc.write_len(pairs.len())?;
            for (key, value) in pairs {
                encode_value(enc, key_shape, key)?;
                encode_value(enc, value_shape, value)?;
            }
        }
        (Shape::Struct(fields), Value::Struct(values)) => {
            let mut values = values.iter();
            for field in Shape::wire_fields(fields) {
                match values.next() {
                    Some((name, value)) if *name == field.name => {
                        encode_value(enc, &field.shape, value)?;
                    }
                    Some((name, _)) => {
                        return Err(mismatch(shape, format!("field {name} in place of {}", field.name)));
                    }
                    None => return Err(mismatch(shape, format!("struct missing {}", field.name))),
                }
            }
            if let Some((name, _)) = values.next() {
                return Err(mismatch(shape, format!("extra field {name}")));
            }
        }
        _ => return Err(mismatch(shape, value.kind())),
    }
    Ok(())
}

/// Read one value laid out as `shape`.
///
/// A map whose wire form repeats a key's bytes keeps the last value for it.
pub fn decode_value<R: Read>(dec: &mut Decoder<R>, shape: &Shape) -> Result<Value> {
    let value = match shape {
        Shape::Bool => Value::Bool(dec.read_bool()?),
        Shape::Int => Value::Int(dec.read_i64()?),
        Shape::Uint => Value::Uint(dec.read_u64()?),
        Shape::I8 => Value::I8(dec.read_i8()?),
        Shape::I16 => Value::I16(dec.read_i16()?),
        Shape::I32 => Value::I32(dec.read_i32()?),
        Shape::I64 => Value::I64(dec.read_i64()?),
        Shape::U8 => Value::U8(dec.read_u8()?),
        Shape::U16 => Value::U16(dec.read_u16()?),
        Shape::U32 => Value::U32(dec.read_u32()?),
        Shape::U64 => Value::U64(dec.read_u64()?),
        Shape::F32 => Value::F32(dec.read_f32()?),
        Shape::F64 => Value::F64(dec.read_f64()?),
        Shape::C64 => Value::C64(dec.read_complex32()?),
        Shape::C128 => Value::C128(dec.read_complex64()?),
        Shape::Bytes => Value::Bytes(dec.read_blob()?),
        Shape::Str => Value::Str(dec.read_string()?),
        Shape::Seq(elem) => {
            let len = dec.read_len()?;
            Value::Seq(decode_items(dec, elem, len)?)
        }
        Shape::Array(len, elem) => {
            dec.read_fixed_len(*len)?;
            Value::Seq(decode_items(dec, elem, *len)?)
        }
        Shape::Map(key_shape, value_shape) => {
            let len = dec.read_len()?;
            let mut pairs: Vec<(Value, Value)> = Vec::new();
            // Keys are matched on their encoded bytes.
            let mut slots: HashMap<Vec<u8>, usize> = HashMap::new();
            for _ in 0..len {
                let key = decode_value(dec, key_shape)?;
                let value = decode_value(dec, value_shape)?;
                let wire = marshal_value(key_shape, &key, *dec.config())?;
                match slots.get(&wire) {
                    Some(&slot) => pairs[slot].1 = value,
                    None => {
                        slots.insert(wire, pairs.len());
                        pairs.push((key, value));
                    }
                }
            }
            Value::Map(pairs)
        }
        Shape::Struct(fields) => {
            let mut values = Vec::new();
            for field in Shape::wire_fields(fields) {
                values.push((field.name.clone(), decode_value(dec, &field.shape)?));
            }
            Value::Struct(values)
        }
    };
    Ok(value)
}

fn decode_items<R: Read>(dec: &mut Decoder<R>, elem: &Shape, len: usize) -> Result<Vec<Value>> {
    // Grows with the data actually decoded; `len` is untrusted.
    let mut items = Vec::new();
    for _ in 0..len {
        items.push(decode_value(dec, elem)?);
    }
    Ok(items)
}

/// Encode `value` as `shape` into a fresh buffer.
pub fn marshal_value(shape: &Shape, value: &Value, config: CodecConfig) -> Result<Vec<u8>> {
    let mut enc = Encoder::with_config(Vec::new(), config);
    encode_value(&mut enc, shape, value)?;
    Ok(enc.into_inner())
}

/// Decode one value of `shape` from `bytes`; trailing bytes are ignored.
pub fn unmarshal_value(shape: &Shape, bytes: &[u8], config: CodecConfig) -> Result<Value> {
    let mut dec = Decoder::with_config(bytes, config);
    decode_value(&mut dec, shape)
}
