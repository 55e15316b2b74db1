/// Register a struct for field-by-field encoding.
///
/// Fields are written in the order listed. Every field of the struct must be
/// named either in the field list or in the optional `skip { .. }` list; the
/// generated code destructures the struct exhaustively, so a field added
/// later without being listed fails to compile. Skipped fields are never
/// written and are left untouched by decoding.
///
/// Generic structs list their type parameters after the name, and each one
/// must itself be `Encode`/`Decode`. Tuple structs bind every position to a
/// local name instead, `wire_struct!(Pair(left, right))`, and cannot skip.
/// Lifetime and const parameters are not accepted.
///
/// ```
/// use wirebin_codec::{marshal, wire_struct};
///
/// #[derive(Default)]
/// struct Header {
///     kind: u8,
///     cache: Vec<u8>,
///     len: u16,
/// }
/// wire_struct!(Header { kind, len } skip { cache });
///
/// let h = Header { kind: 1, cache: vec![9; 32], len: 2 };
/// assert_eq!(marshal(&h)?, [0x01, 0x02, 0x00]);
/// # Ok::<(), wirebin_codec::CodecError>(())
/// ```
#[macro_export]
macro_rules! wire_struct {
    ($ty:ident { $($field:ident),* $(,)? } $(skip { $($skip:ident),* $(,)? })?) => {
        $crate::wire_struct!(@impl [] $ty [] { $($field),* } [$($($skip),*)?]);
    };
    ($ty:ident<$($gen:ident),+ $(,)?> { $($field:ident),* $(,)? } $(skip { $($skip:ident),* $(,)? })?) => {
        $crate::wire_struct!(@impl [$($gen),+] $ty [<$($gen),+>] { $($field),* } [$($($skip),*)?]);
    };
    ($ty:ident ( $($field:ident),+ $(,)? )) => {
        impl $crate::Encode for $ty {
            fn encode<W: ::std::io::Write>(
                &self,
                enc: &mut $crate::Encoder<W>,
            ) -> $crate::Result<()> {
                let $ty($($field),+) = self;
                $(enc.encode($field)?;)+
                Ok(())
            }
        }

        impl $crate::Decode for $ty {
            fn decode<R: ::std::io::Read>(
                &mut self,
                dec: &mut $crate::Decoder<R>,
            ) -> $crate::Result<()> {
                let $ty($($field),+) = self;
                $(dec.decode($field)?;)+
                Ok(())
            }
        }
    };
    (@impl [$($gen:ident),*] $ty:ident [$($args:tt)*] { $($field:ident),* } [$($skip:ident),*]) => {
        impl<$($gen: $crate::Encode),*> $crate::Encode for $ty $($args)* {
            fn encode<W: ::std::io::Write>(
                &self,
                enc: &mut $crate::Encoder<W>,
            ) -> $crate::Result<()> {
                let $ty { $($field,)* $($skip: _,)* } = self;
                $(enc.encode($field)?;)*
                Ok(())
            }
        }

        impl<$($gen: $crate::Decode),*> $crate::Decode for $ty $($args)* {
            fn decode<R: ::std::io::Read>(
                &mut self,
                dec: &mut $crate::Decoder<R>,
            ) -> $crate::Result<()> {
                let $ty { $($field,)* $($skip: _,)* } = self;
                $(dec.decode($field)?;)*
                Ok(())
            }
        }
    };
}

/// Encode a single-field tuple struct exactly like the type it wraps.
///
/// ```
/// use wirebin_codec::{marshal, wire_newtype};
///
/// struct Meters(i64);
/// wire_newtype!(Meters);
///
/// assert_eq!(marshal(&Meters(32))?, marshal(&32i64)?);
/// # Ok::<(), wirebin_codec::CodecError>(())
/// ```
#[macro_export]
macro_rules! wire_newtype {
    ($ty:ident) => {
        impl $crate::Encode for $ty {
            fn encode<W: ::std::io::Write>(
                &self,
                enc: &mut $crate::Encoder<W>,
            ) -> $crate::Result<()> {
                enc.encode(&self.0)
            }
        }

        impl $crate::Decode for $ty {
            fn decode<R: ::std::io::Read>(
                &mut self,
                dec: &mut $crate::Decoder<R>,
            ) -> $crate::Result<()> {
                dec.decode(&mut self.0)
            }
        }
    };
}

/// Route a type's encoding through its [`BinaryMarshaler`](crate::BinaryMarshaler)
/// and [`BinaryUnmarshaler`](crate::BinaryUnmarshaler) impls.
///
/// The type's own bytes travel as one length-prefixed blob; its fields play
/// no part in the wire format.
#[macro_export]
macro_rules! wire_custom {
    ($ty:ty) => {
        impl $crate::Encode for $ty {
            fn encode<W: ::std::io::Write>(
                &self,
                enc: &mut $crate::Encoder<W>,
            ) -> $crate::Result<()> {
                enc.write_custom(self)
            }
        }

        impl $crate::Decode for $ty {
            fn decode<R: ::std::io::Read>(
                &mut self,
                dec: &mut $crate::Decoder<R>,
            ) -> $crate::Result<()> {
                *self = dec.read_custom()?;
                Ok(())
            }
        }
    };
}
