//! Type-directed binary encoding.
//!
//! Values are written without type tags; the reader must know the shape it
//! expects. The wire grammar:
//! - fixed scalars (`bool`, `i8`..`u64`, `f32`, `f64`, complex) at their
//!   declared width in the configured byte order
//! - `isize`/`usize` widened to 64 bits
//! - text, raw bytes and custom encodings as a varint length plus the bytes
//! - sequences and maps as a varint count plus each element in turn
//! - registered structs as their fields in declaration order, nothing else
//!
//! ```
//! use wirebin_codec::{marshal, unmarshal, wire_struct};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     label: String,
//!     x: i16,
//! }
//! wire_struct!(Point { label, x });
//!
//! let bytes = marshal(&Point { label: "A".into(), x: 1 })?;
//! assert_eq!(bytes, [0x01, 0x41, 0x01, 0x00]);
//!
//! let mut back = Point::default();
//! unmarshal(&bytes, &mut back)?;
//! assert_eq!(back.label, "A");
//! # Ok::<(), wirebin_codec::CodecError>(())
//! ```

pub mod codec;
pub mod complex;
pub mod config;
pub mod custom;
pub mod decoder;
pub mod encoder;
pub mod error;
mod macros;
pub mod traits;

pub use codec::{marshal, marshal_with_config, unmarshal, unmarshal_with_config};
pub use complex::{Complex, Complex32, Complex64};
pub use config::{default_endian, set_default_endian, CodecConfig, Endian, DEFAULT_MAX_LENGTH};
pub use custom::{BinaryMarshaler, BinaryUnmarshaler};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{BoxError, CodecError, Result};
pub use traits::{Decode, Encode};
