use bytes::{Buf, BufMut};

use crate::error::{Result, VarintError};

/// Longest possible encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Number of bytes [`encode`] emits for `value`.
pub fn encoded_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Encode `value` into `buf`, returning the number of bytes used.
///
/// The output is always minimal: no trailing `0x80` groups.
pub fn encode(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Decode a varint from the front of `src`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode(src: &[u8]) -> Result<(u64, usize)> {
    let mut acc = Accumulator::default();
    for &byte in src {
        if let Some(value) = acc.push(byte)? {
            return Ok((value, acc.read()));
        }
    }
    Err(acc.exhausted())
}

/// Append the encoding of `value` to `dst`.
pub fn put_uvarint(dst: &mut impl BufMut, value: u64) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode(value, &mut buf);
    dst.put_slice(&buf[..len]);
}

/// Consume a varint from `src`.
///
/// On error the bytes examined so far have already been consumed.
pub fn get_uvarint(src: &mut impl Buf) -> Result<u64> {
    let mut acc = Accumulator::default();
    while src.has_remaining() {
        if let Some(value) = acc.push(src.get_u8())? {
            return Ok(value);
        }
    }
    Err(acc.exhausted())
}

/// Incremental decoder shared by the slice, buffer and stream readers.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    value: u64,
    shift: u32,
    read: usize,
}

impl Accumulator {
    /// Feed one byte. Returns the value once the terminating byte arrives.
    pub(crate) fn push(&mut self, byte: u8) -> Result<Option<u64>> {
        // The 10th byte may only contribute the single remaining bit.
        if self.read == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(VarintError::Overflow);
        }
        self.value |= u64::from(byte & 0x7f) << self.shift;
        self.read += 1;
        if byte < 0x80 {
            return Ok(Some(self.value));
        }
        self.shift += 7;
        Ok(None)
    }

    pub(crate) fn read(&self) -> usize {
        self.read
    }

    /// The error to report when the source runs dry before a terminator.
    pub(crate) fn exhausted(&self) -> VarintError {
        if self.read == 0 {
            VarintError::Eof
        } else {
            VarintError::Truncated { read: self.read }
        }
    }
}
