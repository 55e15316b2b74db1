use std::sync::atomic::{AtomicU8, Ordering};

/// Default cap on decoded length prefixes: 64 MiB / 64 Mi elements.
pub const DEFAULT_MAX_LENGTH: usize = 64 * 1024 * 1024;

/// Byte order of fixed-width scalars. Varints are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Endian {
    Little = 0,
    Big = 1,
}

static DEFAULT_ENDIAN: AtomicU8 = AtomicU8::new(Endian::Little as u8);

/// The process-wide byte order picked up by [`CodecConfig::default`].
pub fn default_endian() -> Endian {
    match DEFAULT_ENDIAN.load(Ordering::Relaxed) {
        1 => Endian::Big,
        _ => Endian::Little,
    }
}

/// Change the process-wide byte order.
///
/// Only configs built afterwards see the change; live encoders and decoders
/// keep the order they were created with.
pub fn set_default_endian(endian: Endian) {
    DEFAULT_ENDIAN.store(endian as u8, Ordering::Relaxed);
}

/// Configuration shared by [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Byte order for fixed-width scalars. Default: [`default_endian()`].
    pub endian: Endian,
    /// Largest blob length or element count a decoder will accept.
    pub max_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            endian: default_endian(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}
