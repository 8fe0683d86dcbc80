use crate::error::Result;
use std::io::{self, Read};

macro_rules! read_be {
    ($name:ident, $type:ty) => {
        pub(crate) fn $name(&mut self) -> io::Result<$type> {
            Ok(<$type>::from_be_bytes(self.read_array()?))
        }
    };
}

/// Sequential big-endian reads over any byte source.
#[derive(Debug)]
pub(crate) struct ByteReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    pub(crate) const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub(crate) const fn position(&self) -> u64 {
        self.position
    }

    read_be!(read_u8, u8);
    read_be!(read_u32, u32);

    pub(crate) fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut buf = [0_u8; N];
        self.inner.read_exact(&mut buf)?;
        self.position += N as u64;

        Ok(buf)
    }

    /// Appends exactly `len` bytes onto `buf`.
    ///
    /// The space is reserved up front so an absurd length is reported as an
    /// allocation failure instead of aborting. On a short read `buf` is left
    /// as it was.
    pub(crate) fn read_into_vec(&mut self, buf: &mut Vec<u8>, len: usize) -> Result<()> {
        buf.try_reserve_exact(len)?;

        let start = buf.len();
        let read = (&mut self.inner).take(len as u64).read_to_end(buf)?;
        self.position += read as u64;

        if read != len {
            buf.truncate(start);
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {len} bytes, got {read}"),
            )
            .into());
        }

        Ok(())
    }

    pub(crate) fn skip(&mut self, len: u64) -> io::Result<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())?;
        self.position += skipped;

        if skipped != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("tried to skip {len} bytes, only {skipped} left"),
            ));
        }

        Ok(())
    }

    /// Every chunk ends with a CRC, which this decoder doesn't verify.
    pub(crate) fn skip_crc(&mut self) -> io::Result<()> {
        self.skip(4)
    }
}
