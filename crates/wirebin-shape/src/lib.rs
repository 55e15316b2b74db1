//! Runtime shapes for wirebin.
//!
//! The static `Encode`/`Decode` traits cover types known at compile time.
//! This crate covers the rest: a [`Shape`] describes a wire layout at run
//! time, a [`Value`] holds data of that shape, and the pair encodes to exactly
//! the bytes the equivalent Rust type would produce.
//!
//! Shapes are written in a small text syntax:
//!
//! ```text
//! bool int uint i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 c64 c128 bytes string
//! [T]            growable sequence
//! [T; N]         fixed-length sequence
//! {K: V}         mapping
//! struct { name: T, _: T }   record; `_` marks a skipped field
//! ```
//!
//! A [`ShapeRegistry`] adds named aliases (`type Celsius = f64;`) that encode
//! identically to the shape they name.

pub mod config;
pub mod error;
pub mod json;
mod parser;
pub mod registry;
pub mod shape;
pub mod value;

pub use config::RegistryConfig;
pub use error::{Result, ShapeError};
pub use registry::ShapeRegistry;
pub use shape::{Field, Shape};
pub use value::{decode_value, encode_value, marshal_value, unmarshal_value, Value};
