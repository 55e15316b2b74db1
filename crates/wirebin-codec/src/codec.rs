use crate::config::CodecConfig;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::traits::{Decode, Encode};

/// Encode a value into a fresh buffer.
pub fn marshal<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    marshal_with_config(value, CodecConfig::default())
}

/// Encode a value into a fresh buffer with explicit configuration.
pub fn marshal_with_config<T: Encode + ?Sized>(value: &T, config: CodecConfig) -> Result<Vec<u8>> {
    let mut enc = Encoder::with_config(Vec::new(), config);
    enc.encode(value)?;
    Ok(enc.into_inner())
}

/// Decode `bytes` into `target`, in place.
///
/// The target must be a mutable reference; handing over a plain value is
/// rejected by the compiler:
///
/// ```compile_fail
/// let v = 0u32;
/// wirebin_codec::unmarshal(&[1, 0, 0, 0], v).unwrap();
/// ```
///
/// ```
/// let mut v = 0u32;
/// wirebin_codec::unmarshal(&[1, 0, 0, 0], &mut v)?;
/// assert_eq!(v, 1);
/// # Ok::<(), wirebin_codec::CodecError>(())
/// ```
///
/// Bytes left over after the value are ignored.
pub fn unmarshal<T: Decode + ?Sized>(bytes: &[u8], target: &mut T) -> Result<()> {
    unmarshal_with_config(bytes, target, CodecConfig::default())
}

/// Decode `bytes` into `target` with explicit configuration.
pub fn unmarshal_with_config<T: Decode + ?Sized>(
    bytes: &[u8],
    target: &mut T,
    config: CodecConfig,
) -> Result<()> {
    Decoder::with_config(bytes, config).decode(target)
}
