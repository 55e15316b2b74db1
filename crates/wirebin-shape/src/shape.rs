use std::fmt;
use std::str::FromStr;

use crate::config::RegistryConfig;
use crate::error::{Result, ShapeError};
use crate::parser::Parser;

/// A wire layout known only at run time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Bool,
    /// Native-width signed integer, 64 bits on the wire.
    Int,
    /// Native-width unsigned integer, 64 bits on the wire.
    Uint,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Complex number made of two `f32`s.
    C64,
    /// Complex number made of two `f64`s.
    C128,
    Bytes,
    Str,
    Seq(Box<Shape>),
    Array(usize, Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Struct(Vec<Field>),
}

/// One field of a [`Shape::Struct`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
    /// Skipped fields are described but never encoded.
    pub skip: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            skip: false,
        }
    }

    pub fn skipped(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            skip: true,
        }
    }
}

const SCALARS: [(&str, Shape); 17] = [
    ("bool", Shape::Bool),
    ("int", Shape::Int),
    ("uint", Shape::Uint),
    ("i8", Shape::I8),
    ("i16", Shape::I16),
    ("i32", Shape::I32),
    ("i64", Shape::I64),
    ("u8", Shape::U8),
    ("u16", Shape::U16),
    ("u32", Shape::U32),
    ("u64", Shape::U64),
    ("f32", Shape::F32),
    ("f64", Shape::F64),
    ("c64", Shape::C64),
    ("c128", Shape::C128),
    ("bytes", Shape::Bytes),
    ("string", Shape::Str),
];

impl Shape {
    /// The built-in leaf shape called `name`, if any.
    pub fn scalar(name: &str) -> Option<Shape> {
        SCALARS
            .iter()
            .find(|(scalar, _)| *scalar == name)
            .map(|(_, shape)| shape.clone())
    }

    /// Whether `name` is reserved by a built-in shape or keyword.
    pub fn is_reserved(name: &str) -> bool {
        name == "struct" || name == "type" || Self::scalar(name).is_some()
    }

    pub fn seq(elem: Shape) -> Self {
        Self::Seq(Box::new(elem))
    }

    pub fn array(len: usize, elem: Shape) -> Self {
        Self::Array(len, Box::new(elem))
    }

    pub fn map(key: Shape, value: Shape) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Parse shape text with explicit limits and no named shapes.
    pub fn parse_with_config(text: &str, config: &RegistryConfig) -> Result<Self> {
        let mut parser = Parser::new(text, None, config.max_depth);
        let shape = parser.parse_shape()?;
        parser.finish()?;
        Ok(shape)
    }

    /// Fields that appear on the wire, in order.
    pub fn wire_fields(fields: &[Field]) -> impl Iterator<Item = &Field> {
        fields.iter().filter(|field| !field.skip)
    }
}

impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse_with_config(text, &RegistryConfig::default())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = SCALARS.iter().find(|(_, shape)| shape == self) {
            return f.write_str(name);
        }
        match self {
            Shape::Seq(elem) => write!(f, "[{elem}]"),
            Shape::Array(len, elem) => write!(f, "[{elem}; {len}]"),
            Shape::Map(key, value) => write!(f, "{{{key}: {value}}}"),
            Shape::Struct(fields) => {
                f.write_str("struct {")?;
                for (i, field) in fields.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    let name = if field.skip { "_" } else { field.name.as_str() };
                    write!(f, "{sep}{name}: {}", field.shape)?;
                }
                if !fields.is_empty() {
                    f.write_str(" ")?;
                }
                f.write_str("}")
            }
            _ => unreachable!("scalar shapes are listed in SCALARS"),
        }
    }
}
