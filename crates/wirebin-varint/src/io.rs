use std::io::{ErrorKind, Read, Write};

use crate::codec::{encode, Accumulator, MAX_VARINT_LEN};
use crate::error::Result;

/// Write the encoding of `value` to `w`, returning the number of bytes written.
pub fn write_uvarint<W: Write + ?Sized>(w: &mut W, value: u64) -> Result<usize> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode(value, &mut buf);
    w.write_all(&buf[..len])?;
    Ok(len)
}

/// Read a varint from `r` one byte at a time.
///
/// Never reads past the terminating byte, so `r` may be shared with other
/// readers of the same stream. Wrap slow sources in a `BufReader`.
pub fn read_uvarint<R: Read + ?Sized>(r: &mut R) -> Result<u64> {
    let mut acc = Accumulator::default();
    let mut byte = [0u8; 1];
    loop {
        match r.read(&mut byte) {
            Ok(0) => return Err(acc.exhausted()),
            Ok(_) => {
                if let Some(value) = acc.push(byte[0])? {
                    return Ok(value);
                }
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::VarintError;

    #[test]
    fn write_then_read() {
        let mut wire = Vec::new();
        assert_eq!(write_uvarint(&mut wire, 128).unwrap(), 2);
        assert_eq!(write_uvarint(&mut wire, 0).unwrap(), 1);
        assert_eq!(wire, [0x80, 0x01, 0x00]);

        let mut cursor = Cursor::new(wire);
        assert_eq!(read_uvarint(&mut cursor).unwrap(), 128);
        assert_eq!(read_uvarint(&mut cursor).unwrap(), 0);
        assert!(matches!(read_uvarint(&mut cursor), Err(VarintError::Eof)));
    }

    #[test]
    fn read_does_not_overconsume() {
        let mut cursor = Cursor::new(vec![0x05, 0xaa]);
        assert_eq!(read_uvarint(&mut cursor).unwrap(), 5);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn read_truncated_mid_value() {
        let mut cursor = Cursor::new(vec![0x80, 0x80, 0x80]);
        let err = read_uvarint(&mut cursor).unwrap_err();
        assert!(matches!(err, VarintError::Truncated { read: 3 }));
    }

    #[test]
    fn read_retries_interrupted() {
        let mut reader = InterruptedOnce {
            interrupted: false,
            inner: Cursor::new(vec![0xac, 0x02]),
        };
        assert_eq!(read_uvarint(&mut reader).unwrap(), 300);
    }

    #[test]
    fn read_surfaces_io_errors() {
        let err = read_uvarint(&mut FailingReader).unwrap_err();
        assert!(matches!(err, VarintError::Io(_)));
    }

    struct InterruptedOnce {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }
    }
}
