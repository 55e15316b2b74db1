use std::io::{BufReader, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use tracing::debug;

use crate::complex::{Complex32, Complex64};
use crate::config::{CodecConfig, Endian};
use crate::custom::BinaryUnmarshaler;
use crate::error::{CodecError, Result};
use crate::traits::Decode;

macro_rules! endian_readers {
    ($($name:ident($ty:ty) => $method:ident;)*) => {$(
        #[doc = concat!("Read a `", stringify!($ty), "` in the configured byte order.")]
        pub fn $name(&mut self) -> Result<$ty> {
            let value = match self.config.endian {
                Endian::Little => self.inner.$method::<LittleEndian>()?,
                Endian::Big => self.inner.$method::<BigEndian>()?,
            };
            Ok(value)
        }
    )*};
}

/// Reads values from any `Read` source.
///
/// The source is buffered internally, so the decoder may pull bytes beyond
/// the last value it returned. Keep using the same decoder for a stream
/// rather than going back to the raw source.
pub struct Decoder<R> {
    inner: BufReader<R>,
    config: CodecConfig,
}

impl<R: Read> Decoder<R> {
    /// Create a new decoder with default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new decoder with explicit configuration.
    pub fn with_config(inner: R, config: CodecConfig) -> Self {
        Self {
            inner: BufReader::new(inner),
            config,
        }
    }

    /// Decode one value into `target`, in place.
    pub fn decode<T: Decode + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        target.decode(self)
    }

    /// Read a varint.
    pub fn read_uvarint(&mut self) -> Result<u64> {
        Ok(wirebin_varint::read_uvarint(&mut self.inner)?)
    }

    /// Read a length or element count prefix, bounded by `max_length`.
    pub fn read_len(&mut self) -> Result<usize> {
        let len = self.read_uvarint()?;
        if len > self.config.max_length as u64 {
            debug!(len, max = self.config.max_length, "rejecting oversized length prefix");
            return Err(CodecError::LengthTooLarge {
                len,
                max: self.config.max_length,
            });
        }
        Ok(len as usize)
    }

    /// Read an element count that must equal `expected`.
    pub fn read_fixed_len(&mut self, expected: usize) -> Result<()> {
        let encoded = self.read_uvarint()?;
        if encoded != expected as u64 {
            debug!(encoded, expected, "fixed-length target size mismatch");
            return Err(CodecError::LengthMismatch { encoded, expected });
        }
        Ok(())
    }

    /// Fill `buf` exactly.
    pub fn read_raw(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf)?;
        Ok(())
    }

    /// Replace the contents of `buf` with exactly `len` bytes.
    pub fn read_raw_into(&mut self, buf: &mut Vec<u8>, len: usize) -> Result<()> {
        buf.clear();
        // Grows with the data actually present instead of trusting `len` up front.
        let read = (&mut self.inner).take(len as u64).read_to_end(buf)?;
        if read < len {
            return Err(CodecError::UnexpectedEof);
        }
        Ok(())
    }

    /// Read a length-prefixed blob.
    pub fn read_blob(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_blob_into(&mut buf)?;
        Ok(buf)
    }

    /// Read a length-prefixed blob into an existing buffer.
    pub fn read_blob_into(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let len = self.read_len()?;
        self.read_raw_into(buf, len)
    }

    /// Read length-prefixed UTF-8 text.
    pub fn read_string(&mut self) -> Result<String> {
        Ok(String::from_utf8(self.read_blob()?)?)
    }

    /// Read a bool; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.inner.read_u8()?)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.inner.read_i8()?)
    }

    endian_readers! {
        read_u16(u16) => read_u16;
        read_u32(u32) => read_u32;
        read_u64(u64) => read_u64;
        read_i16(i16) => read_i16;
        read_i32(i32) => read_i32;
        read_i64(i64) => read_i64;
        read_f32(f32) => read_f32;
        read_f64(f64) => read_f64;
    }

    /// Read a 64-bit signed integer and narrow it to the platform width.
    pub fn read_isize(&mut self) -> Result<isize> {
        let value = self.read_i64()?;
        isize::try_from(value).map_err(|_| CodecError::IntegerOverflow {
            value: i128::from(value),
            target: "isize",
        })
    }

    /// Read a 64-bit unsigned integer and narrow it to the platform width.
    pub fn read_usize(&mut self) -> Result<usize> {
        let value = self.read_u64()?;
        usize::try_from(value).map_err(|_| CodecError::IntegerOverflow {
            value: i128::from(value),
            target: "usize",
        })
    }

    pub fn read_complex32(&mut self) -> Result<Complex32> {
        let re = self.read_f32()?;
        let im = self.read_f32()?;
        Ok(Complex32::new(re, im))
    }

    pub fn read_complex64(&mut self) -> Result<Complex64> {
        let re = self.read_f64()?;
        let im = self.read_f64()?;
        Ok(Complex64::new(re, im))
    }

    /// Read a blob in full and hand it to the type's own unmarshaler.
    pub fn read_custom<T: BinaryUnmarshaler>(&mut self) -> Result<T> {
        let bytes = self.read_blob()?;
        T::unmarshal_binary(&bytes).map_err(CodecError::Custom)
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        self.inner.get_mut()
    }

    /// Consume the decoder and return the inner source.
    ///
    /// Bytes already buffered but not yet decoded are dropped.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Current decoder configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}
