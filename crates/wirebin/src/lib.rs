//! Compact, type-directed binary encoding.
//!
//! wirebin writes values without type tags or field names: the reader must
//! know the shape it expects. Scalars go out at their declared width in a
//! configurable byte order, while text, byte blobs, sequences and maps carry a
//! varint length prefix.
//!
//! # Crate Structure
//!
//! - [`varint`]: unsigned LEB128 varints over buffers and streams
//! - [`codec`]: static `Encode`/`Decode` traits, streaming encoder and decoder
//! - [`shape`]: runtime shapes, dynamic values and JSON conversion (behind the
//!   `shape` feature)
//!
//! ```
//! use wirebin::{marshal_with_config, unmarshal_with_config, wire_struct, CodecConfig, Endian};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct S0 {
//!     a: String,
//!     b: String,
//!     c: i16,
//! }
//! wire_struct!(S0 { a, b, c });
//!
//! let value = S0 { a: "A".into(), b: "B".into(), c: 1 };
//! let cfg = CodecConfig { endian: Endian::Little, ..CodecConfig::default() };
//! let bytes = marshal_with_config(&value, cfg)?;
//! assert_eq!(bytes, [0x1, 0x41, 0x1, 0x42, 0x1, 0x0]);
//!
//! let mut back = S0::default();
//! unmarshal_with_config(&bytes, &mut back, cfg)?;
//! assert_eq!(back, value);
//! # Ok::<(), wirebin::CodecError>(())
//! ```

/// Re-export varint primitives.
pub mod varint {
    pub use wirebin_varint::*;
}

/// Re-export codec types.
pub mod codec {
    pub use wirebin_codec::*;
}

/// Re-export runtime shape types (requires `shape` feature).
#[cfg(feature = "shape")]
pub mod shape {
    pub use wirebin_shape::*;
}

pub use wirebin_codec::{
    default_endian, marshal, marshal_with_config, set_default_endian, unmarshal,
    unmarshal_with_config, wire_custom, wire_newtype, wire_struct, BinaryMarshaler,
    BinaryUnmarshaler, CodecConfig, CodecError, Complex, Complex32, Complex64, Decode, Decoder,
    Encode, Encoder, Endian,
};
