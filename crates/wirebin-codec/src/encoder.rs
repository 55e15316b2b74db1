use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use tracing::trace;

use crate::complex::{Complex32, Complex64};
use crate::config::{CodecConfig, Endian};
use crate::custom::BinaryMarshaler;
use crate::error::{CodecError, Result};
use crate::traits::Encode;

macro_rules! endian_writers {
    ($($name:ident($ty:ty) => $method:ident;)*) => {$(
        #[doc = concat!("Write a `", stringify!($ty), "` in the configured byte order.")]
        pub fn $name(&mut self, value: $ty) -> Result<()> {
            match self.config.endian {
                Endian::Little => self.inner.$method::<LittleEndian>(value)?,
                Endian::Big => self.inner.$method::<BigEndian>(value)?,
            }
            Ok(())
        }
    )*};
}

/// Writes values to any `Write` sink.
///
/// Nothing is buffered here; a failed encode may leave a partial value in
/// the sink. Encode into a `Vec<u8>` first when the output must be atomic.
pub struct Encoder<W> {
    inner: W,
    config: CodecConfig,
}

impl<W: Write> Encoder<W> {
    /// Create a new encoder with default configuration.
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a new encoder with explicit configuration.
    pub fn with_config(inner: W, config: CodecConfig) -> Self {
        Self { inner, config }
    }

    /// Encode one value.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Write a varint.
    pub fn write_uvarint(&mut self, value: u64) -> Result<()> {
        wirebin_varint::write_uvarint(&mut self.inner, value)?;
        Ok(())
    }

    /// Write a length or element count prefix.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_uvarint(len as u64)
    }

    /// Write bytes with no prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    /// Write a length-prefixed blob.
    pub fn write_blob(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_len(bytes.len())?;
        self.write_raw(bytes)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.inner.write_u8(value)?;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.inner.write_i8(value)?;
        Ok(())
    }

    endian_writers! {
        write_u16(u16) => write_u16;
        write_u32(u32) => write_u32;
        write_u64(u64) => write_u64;
        write_i16(i16) => write_i16;
        write_i32(i32) => write_i32;
        write_i64(i64) => write_i64;
        write_f32(f32) => write_f32;
        write_f64(f64) => write_f64;
    }

    /// Write a native-width signed integer, widened to 64 bits.
    ///
    /// This is the one scalar whose width is not preserved on the wire.
    pub fn write_isize(&mut self, value: isize) -> Result<()> {
        self.write_i64(value as i64)
    }

    /// Write a native-width unsigned integer, widened to 64 bits.
    pub fn write_usize(&mut self, value: usize) -> Result<()> {
        self.write_u64(value as u64)
    }

    pub fn write_complex32(&mut self, value: Complex32) -> Result<()> {
        self.write_f32(value.re)?;
        self.write_f32(value.im)
    }

    pub fn write_complex64(&mut self, value: Complex64) -> Result<()> {
        self.write_f64(value.re)?;
        self.write_f64(value.im)
    }

    /// Write a value through its own marshaler, as a blob.
    ///
    /// The length prefix goes out only once the marshaler has succeeded.
    pub fn write_custom<T: BinaryMarshaler + ?Sized>(&mut self, value: &T) -> Result<()> {
        let bytes = value.marshal_binary().map_err(CodecError::Custom)?;
        trace!(len = bytes.len(), "writing custom encoding");
        self.write_blob(&bytes)
    }

    /// Write an element count followed by each element.
    pub fn write_seq<'a, T, I>(&mut self, items: I) -> Result<()>
    where
        T: Encode + 'a,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        self.write_len(items.len())?;
        for item in items {
            item.encode(self)?;
        }
        Ok(())
    }

    /// Write a pair count followed by each key and value.
    pub fn write_map<'a, K, V, I>(&mut self, pairs: I) -> Result<()>
    where
        K: Encode + 'a,
        V: Encode + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
        I::IntoIter: ExactSizeIterator,
    {
        let pairs = pairs.into_iter();
        self.write_len(pairs.len())?;
        for (key, value) in pairs {
            key.encode(self)?;
            value.encode(self)?;
        }
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the encoder and return the inner sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Current encoder configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::complex::Complex;
    use crate::error::BoxError;

    fn little() -> Encoder<Vec<u8>> {
        Encoder::with_config(
            Vec::new(),
            CodecConfig {
                endian: Endian::Little,
                ..CodecConfig::default()
            },
        )
    }

    fn big() -> Encoder<Vec<u8>> {
        Encoder::with_config(
            Vec::new(),
            CodecConfig {
                endian: Endian::Big,
                ..CodecConfig::default()
            },
        )
    }

    #[test]
    fn blob_is_length_prefixed() {
        let mut enc = little();
        enc.write_blob(b"hi").unwrap();
        enc.write_blob(b"").unwrap();
        assert_eq!(enc.into_inner(), [0x02, b'h', b'i', 0x00]);
    }

    #[test]
    fn scalars_follow_configured_endian() {
        let mut enc = little();
        enc.write_u16(0x0102).unwrap();
        enc.write_i32(-2).unwrap();
        assert_eq!(enc.into_inner(), [0x02, 0x01, 0xfe, 0xff, 0xff, 0xff]);

        let mut enc = big();
        enc.write_u16(0x0102).unwrap();
        enc.write_i32(-2).unwrap();
        assert_eq!(enc.into_inner(), [0x01, 0x02, 0xff, 0xff, 0xff, 0xfe]);
    }

    #[test]
    fn varint_prefix_ignores_endian() {
        let mut enc = big();
        enc.write_blob(&[0u8; 300]).unwrap();
        assert_eq!(&enc.into_inner()[..2], [0xac, 0x02]);
    }

    #[test]
    fn native_ints_widen_to_64_bits() {
        let mut enc = little();
        enc.write_isize(-1).unwrap();
        enc.write_usize(2).unwrap();
        let wire = enc.into_inner();
        assert_eq!(wire.len(), 16);
        assert_eq!(&wire[..8], [0xff; 8]);
        assert_eq!(&wire[8..], [2, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn bool_is_one_byte() {
        let mut enc = little();
        enc.write_bool(true).unwrap();
        enc.write_bool(false).unwrap();
        assert_eq!(enc.into_inner(), [0x01, 0x00]);
    }

    #[test]
    fn complex_is_real_then_imaginary() {
        let mut enc = little();
        enc.write_complex32(Complex::new(1.0, -1.0)).unwrap();
        let wire = enc.into_inner();
        assert_eq!(&wire[..4], 1.0f32.to_le_bytes());
        assert_eq!(&wire[4..], (-1.0f32).to_le_bytes());
    }

    #[test]
    fn failed_custom_writes_nothing() {
        struct Broken;
        impl BinaryMarshaler for Broken {
            fn marshal_binary(&self) -> std::result::Result<Vec<u8>, BoxError> {
                Err("nope".into())
            }
        }

        let mut enc = little();
        let err = enc.write_custom(&Broken).unwrap_err();
        assert!(matches!(err, CodecError::Custom(_)));
        assert!(enc.get_ref().is_empty());
    }

    #[test]
    fn seq_and_map_prefix_counts() {
        let mut enc = little();
        enc.write_seq(&[1u16, 2]).unwrap();
        enc.write_map(vec![(&1u8, &true)]).unwrap();
        assert_eq!(enc.into_inner(), [0x02, 0x01, 0x00, 0x02, 0x00, 0x01, 0x01, 0x01]);
    }

    #[test]
    fn sink_errors_propagate() {
        let mut enc = Encoder::new(FailingWriter);
        let err = enc.write_u8(1).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut enc = Encoder::new(sink);

        enc.write_bool(true).unwrap();
        enc.flush().unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut enc = little();
        assert_eq!(enc.config().endian, Endian::Little);
        enc.get_mut().push(0xaa);
        let _ = enc.get_ref();
        assert_eq!(enc.into_inner(), [0xaa]);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }
}
