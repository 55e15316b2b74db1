//! Wire dispatch for built-in types.
//!
//! Each `Encode` impl has exactly one matching `Decode` impl reading the same
//! bytes back. Raw byte sequences take a fast path through
//! [`Encode::encode_slice`]/[`Decode::decode_vec`], which for `u8` produces
//! the same bytes as the element-by-element form.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::io::{Read, Write};

use bytes::Bytes;

use crate::complex::{Complex32, Complex64};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;

/// A value with a wire representation.
pub trait Encode {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()>;

    /// Encode the elements of a sequence, after its count has been written.
    #[doc(hidden)]
    fn encode_slice<W: Write>(items: &[Self], enc: &mut Encoder<W>) -> Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.encode(enc)?;
        }
        Ok(())
    }
}

/// A value that can be overwritten in place from its wire representation.
pub trait Decode {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()>;

    /// Replace `items` with `len` freshly decoded elements.
    #[doc(hidden)]
    fn decode_vec<R: Read>(items: &mut Vec<Self>, len: usize, dec: &mut Decoder<R>) -> Result<()>
    where
        Self: Sized + Default,
    {
        items.clear();
        for _ in 0..len {
            let mut item = Self::default();
            item.decode(dec)?;
            items.push(item);
        }
        Ok(())
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $write:ident, $read:ident;)*) => {$(
        impl Encode for $ty {
            fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
                enc.$write(*self)
            }
        }

        impl Decode for $ty {
            fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
                *self = dec.$read()?;
                Ok(())
            }
        }
    )*};
}

impl_scalar! {
    bool => write_bool, read_bool;
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
    isize => write_isize, read_isize;
    usize => write_usize, read_usize;
    Complex32 => write_complex32, read_complex32;
    Complex64 => write_complex64, read_complex64;
}

impl Encode for u8 {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_u8(*self)
    }

    fn encode_slice<W: Write>(items: &[Self], enc: &mut Encoder<W>) -> Result<()> {
        enc.write_raw(items)
    }
}

impl Decode for u8 {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        *self = dec.read_u8()?;
        Ok(())
    }

    fn decode_vec<R: Read>(items: &mut Vec<Self>, len: usize, dec: &mut Decoder<R>) -> Result<()> {
        dec.read_raw_into(items, len)
    }
}

impl Encode for str {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_blob(self.as_bytes())
    }
}

impl Encode for String {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_blob(self.as_bytes())
    }
}

impl Decode for String {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        *self = dec.read_string()?;
        Ok(())
    }
}

impl Encode for Bytes {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_blob(self)
    }
}

impl Decode for Bytes {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        *self = Bytes::from(dec.read_blob()?);
        Ok(())
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_len(self.len())?;
        T::encode_slice(self, enc)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        self.as_slice().encode(enc)
    }
}

impl<T: Decode + Default> Decode for Vec<T> {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let len = dec.read_len()?;
        T::decode_vec(self, len, dec)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        self.as_slice().encode(enc)
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        dec.read_fixed_len(N)?;
        for item in self.iter_mut() {
            item.decode(dec)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_seq(self)
    }
}

impl<T: Decode + Default> Decode for VecDeque<T> {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let len = dec.read_len()?;
        self.clear();
        for _ in 0..len {
            let mut item = T::default();
            item.decode(dec)?;
            self.push_back(item);
        }
        Ok(())
    }
}

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_map(self)
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Default + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher,
{
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let len = dec.read_len()?;
        self.clear();
        for _ in 0..len {
            let (key, value) = decode_pair(dec)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_map(self)
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Default + Ord,
    V: Decode + Default,
{
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let len = dec.read_len()?;
        self.clear();
        for _ in 0..len {
            let (key, value) = decode_pair(dec)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

fn decode_pair<K, V, R>(dec: &mut Decoder<R>) -> Result<(K, V)>
where
    K: Decode + Default,
    V: Decode + Default,
    R: Read,
{
    let mut key = K::default();
    key.decode(dec)?;
    let mut value = V::default();
    value.decode(dec)?;
    Ok((key, value))
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        (**self).encode(enc)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        (**self).encode(enc)
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn decode<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        (**self).decode(dec)
    }
}
