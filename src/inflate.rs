use crate::{
    error::{DecodeError, Result},
    reader::ByteReader,
};
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Read;

/// Output grows by this many bytes whenever inflate runs out of room.
pub const INFLATE_INCREMENT: usize = 65536;

/// The concatenated bodies of every IDAT chunk seen so far.
///
/// Chunk boundaries mean nothing to the zlib stream: the compressed stream is
/// the concatenation of the contents of all image data chunks.
#[derive(Debug, Default)]
pub(crate) struct CompressedStream {
    data: Vec<u8>,
    chunks: usize,
}

impl CompressedStream {
    pub(crate) fn append<R: Read>(&mut self, reader: &mut ByteReader<R>, length: u32) -> Result<()> {
        reader.read_into_vec(&mut self.data, length as usize)?;
        reader.skip_crc()?;

        self.chunks += 1;

        Ok(())
    }

    pub(crate) const fn chunks(&self) -> usize {
        self.chunks
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Inflates the whole stream. The output size is whatever zlib reports,
    /// nothing about it is assumed from the image dimensions.
    pub(crate) fn inflate(&self) -> Result<Vec<u8>> {
        if self.chunks == 0 {
            return Err(DecodeError::InvalidFormat("no image data chunks"));
        }

        inflate(&self.data)
    }
}

pub(crate) fn inflate(input: &[u8]) -> Result<Vec<u8>> {
    let mut zlib = Decompress::new(true);
    let mut output = Vec::new();

    loop {
        if output.len() == output.capacity() {
            output.try_reserve(INFLATE_INCREMENT)?;
        }

        let consumed = zlib.total_in();
        let produced = zlib.total_out();

        let status = zlib
            .decompress_vec(&input[consumed as usize..], &mut output, FlushDecompress::Sync)
            .map_err(|err| DecodeError::InflateFailure(err.to_string()))?;

        log::trace!(
            "inflate: {} -> {} bytes, {:?}",
            zlib.total_in(),
            zlib.total_out(),
            status
        );

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if zlib.total_in() == consumed && zlib.total_out() == produced {
                    return Err(DecodeError::InflateFailure(
                        "zlib stream ended early".to_owned(),
                    ));
                }
            }
        }
    }

    debug_assert_eq!(output.len() as u64, zlib.total_out());

    Ok(output)
}
