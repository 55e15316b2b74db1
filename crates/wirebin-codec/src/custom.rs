//! Types that supply their own byte encoding.
//!
//! A type implementing both traits and registered with
//! [`wire_custom!`](crate::wire_custom) bypasses structural encoding entirely:
//! its bytes travel as a single length-prefixed blob, whatever its fields are.

use crate::error::BoxError;

/// Produce this value's own byte encoding.
pub trait BinaryMarshaler {
    fn marshal_binary(&self) -> Result<Vec<u8>, BoxError>;
}

/// Rebuild a value from bytes produced by [`BinaryMarshaler::marshal_binary`].
///
/// `data` is always the complete blob; short input never reaches this call.
pub trait BinaryUnmarshaler: Sized {
    fn unmarshal_binary(data: &[u8]) -> Result<Self, BoxError>;
}
