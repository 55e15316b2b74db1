//! Conversion between [`Value`] and JSON.
//!
//! | shape            | JSON                                           |
//! |------------------|------------------------------------------------|
//! | integers, floats | number                                         |
//! | `c64`, `c128`    | `[re, im]`                                     |
//! | `bytes`          | lowercase hex string                           |
//! | `[T]`, `[T; N]`  | array                                          |
//! | `{string: V}`    | object                                         |
//! | other maps       | array of `[key, value]` pairs, `{}` when empty |
//! | `struct`         | object keyed by field name, skipped fields out |
//!
//! Objects keep their keys in wire order.

use serde_json::{Map, Number, Value as Json};
use wirebin_codec::Complex;

use crate::error::{Result, ShapeError};
use crate::shape::Shape;
use crate::value::Value;

fn invalid(shape: &Shape, message: impl Into<String>) -> ShapeError {
    ShapeError::Json {
        shape: shape.to_string(),
        message: message.into(),
    }
}

fn signed<T: TryFrom<i64>>(shape: &Shape, json: &Json) -> Result<T> {
    let wide = json
        .as_i64()
        .ok_or_else(|| invalid(shape, format!("expected an integer, found {json}")))?;
    T::try_from(wide).map_err(|_| invalid(shape, format!("{wide} is out of range")))
}

fn unsigned<T: TryFrom<u64>>(shape: &Shape, json: &Json) -> Result<T> {
    let wide = json
        .as_u64()
        .ok_or_else(|| invalid(shape, format!("expected an unsigned integer, found {json}")))?;
    T::try_from(wide).map_err(|_| invalid(shape, format!("{wide} is out of range")))
}

fn float(shape: &Shape, json: &Json) -> Result<f64> {
    json.as_f64()
        .ok_or_else(|| invalid(shape, format!("expected a number, found {json}")))
}

fn float32(shape: &Shape, json: &Json) -> Result<f32> {
    let narrow = float(shape, json)? as f32;
    if narrow.is_finite() {
        Ok(narrow)
    } else {
        Err(invalid(shape, format!("{json} is out of range")))
    }
}

fn complex(shape: &Shape, json: &Json) -> Result<(f64, f64)> {
    match json.as_array().map(Vec::as_slice) {
        Some([re, im]) => Ok((float(shape, re)?, float(shape, im)?)),
        _ => Err(invalid(shape, "expected [re, im]")),
    }
}

fn array<'j>(shape: &Shape, json: &'j Json) -> Result<&'j Vec<Json>> {
    json.as_array()
        .ok_or_else(|| invalid(shape, format!("expected an array, found {json}")))
}

impl Value {
    /// Build a value of `shape` from JSON.
    pub fn from_json(shape: &Shape, json: &Json) -> Result<Value> {
        let value = match shape {
            Shape::Bool => Value::Bool(
                json.as_bool()
                    .ok_or_else(|| invalid(shape, format!("expected a bool, found {json}")))?,
            ),
            Shape::Int => Value::Int(signed(shape, json)?),
            Shape::I8 => Value::I8(signed(shape, json)?),
            Shape::I16 => Value::I16(signed(shape, json)?),
            Shape::I32 => Value::I32(signed(shape, json)?),
            Shape::I64 => Value::I64(signed(shape, json)?),
            Shape::Uint => Value::Uint(unsigned(shape, json)?),
            Shape::U8 => Value::U8(unsigned(shape, json)?),
            Shape::U16 => Value::U16(unsigned(shape, json)?),
            Shape::U32 => Value::U32(unsigned(shape, json)?),
            Shape::U64 => Value::U64(unsigned(shape, json)?),
            Shape::F32 => Value::F32(float32(shape, json)?),
            Shape::F64 => Value::F64(float(shape, json)?),
            Shape::C64 => match json.as_array().map(Vec::as_slice) {
                Some([re, im]) => Value::C64(Complex::new(float32(shape, re)?, float32(shape, im)?)),
                _ => return Err(invalid(shape, "expected [re, im]")),
            },
            Shape::C128 => {
                let (re, im) = complex(shape, json)?;
                Value::C128(Complex::new(re, im))
            }
            Shape::Bytes => {
                let text = json
                    .as_str()
                    .ok_or_else(|| invalid(shape, "expected a hex string"))?;
                Value::Bytes(hex::decode(text).map_err(|err| invalid(shape, err.to_string()))?)
            }
            Shape::Str => Value::Str(
                json.as_str()
                    .ok_or_else(|| invalid(shape, format!("expected a string, found {json}")))?
                    .to_string(),
            ),
            Shape::Seq(elem) => Value::Seq(
                array(shape, json)?
                    .iter()
                    .map(|item| Value::from_json(elem, item))
                    .collect::<Result<_>>()?,
            ),
            Shape::Array(len, elem) => {
                let items = array(shape, json)?;
                if items.len() != *len {
                    return Err(invalid(
                        shape,
                        format!("expected {len} elements, found {}", items.len()),
                    ));
                }
                Value::Seq(
                    items
                        .iter()
                        .map(|item| Value::from_json(elem, item))
                        .collect::<Result<_>>()?,
                )
            }
            Shape::Map(key_shape, value_shape) => match json {
                // An empty map renders as `{}` whatever its key shape.
                Json::Object(object) if object.is_empty() => Value::Map(Vec::new()),
                Json::Object(object) if **key_shape == Shape::Str => Value::Map(
                    object
                        .iter()
                        .map(|(k, v)| -> Result<(Value, Value)> {
                            Ok((Value::Str(k.clone()), Value::from_json(value_shape, v)?))
                        })
                        .collect::<Result<_>>()?,
                ),
                _ => {
                    let mut pairs = Vec::new();
                    for entry in array(shape, json)? {
                        match entry.as_array().map(Vec::as_slice) {
                            Some([k, v]) => pairs.push((
                                Value::from_json(key_shape, k)?,
                                Value::from_json(value_shape, v)?,
                            )),
                            _ => return Err(invalid(shape, "expected [key, value] pairs")),
                        }
                    }
                    Value::Map(pairs)
                }
            },
            Shape::Struct(fields) => {
                let object = json
                    .as_object()
                    .ok_or_else(|| invalid(shape, format!("expected an object, found {json}")))?;
                let mut values = Vec::new();
                for field in Shape::wire_fields(fields) {
                    let item = object
                        .get(&field.name)
                        .ok_or_else(|| invalid(shape, format!("missing field {}", field.name)))?;
                    values.push((field.name.clone(), Value::from_json(&field.shape, item)?));
                }
                if let Some(unknown) = object
                    .keys()
                    .find(|key| !Shape::wire_fields(fields).any(|f| &f.name == *key))
                {
                    return Err(invalid(shape, format!("unknown field {unknown}")));
                }
                Value::Struct(values)
            }
        };
        Ok(value)
    }

    /// Render this value as JSON.
    ///
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Bool(v) => Json::Bool(*v),
            Value::Int(v) | Value::I64(v) => Json::from(*v),
            Value::Uint(v) | Value::U64(v) => Json::from(*v),
            Value::I8(v) => Json::from(*v),
            Value::I16(v) => Json::from(*v),
            Value::I32(v) => Json::from(*v),
            Value::U8(v) => Json::from(*v),
            Value::U16(v) => Json::from(*v),
            Value::U32(v) => Json::from(*v),
            Value::F32(v) => number(f64::from(*v)),
            Value::F64(v) => number(*v),
            Value::C64(v) => Json::Array(vec![number(f64::from(v.re)), number(f64::from(v.im))]),
            Value::C128(v) => Json::Array(vec![number(v.re), number(v.im)]),
            Value::Bytes(v) => Json::String(hex::encode(v)),
            Value::Str(v) => Json::String(v.clone()),
            Value::Seq(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(pairs) => {
                if pairs.iter().all(|(k, _)| matches!(k, Value::Str(_))) {
                    let mut object = Map::new();
                    for (k, v) in pairs {
                        if let Value::Str(key) = k {
                            object.insert(key.clone(), v.to_json());
                        }
                    }
                    Json::Object(object)
                } else {
                    Json::Array(
                        pairs
                            .iter()
                            .map(|(k, v)| Json::Array(vec![k.to_json(), v.to_json()]))
                            .collect(),
                    )
                }
            }
            Value::Struct(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

fn number(v: f64) -> Json {
    Number::from_f64(v).map_or(Json::Null, Json::Number)
}
