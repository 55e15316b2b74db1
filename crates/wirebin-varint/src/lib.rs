//! Unsigned LEB128 varints.
//!
//! Every length prefix on the wirebin wire is a varint: 7 data bits per byte,
//! least-significant group first, high bit set on every byte but the last.
//! A `u64` never needs more than [`MAX_VARINT_LEN`] bytes.
//!
//! Three flavours share one decoding state machine:
//! - [`encode`] / [`decode`] over plain slices
//! - [`put_uvarint`] / [`get_uvarint`] over `bytes` buffers
//! - [`write_uvarint`] / [`read_uvarint`] over `std::io` streams

pub mod codec;
pub mod error;
pub mod io;

pub use codec::{decode, encode, encoded_len, get_uvarint, put_uvarint, MAX_VARINT_LEN};
pub use error::{Result, VarintError};
pub use io::{read_uvarint, write_uvarint};
