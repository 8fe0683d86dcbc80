use crate::{
    error::{DecodeError, Result},
    reader::ByteReader,
};
use std::{fmt, io::Read};

pub const SIGNATURE: [u8; 8] = *b"\x89PNG\r\n\x1A\n";

pub(crate) fn check_signature<R: Read>(reader: &mut ByteReader<R>) -> Result<()> {
    match reader.read_array::<8>() {
        Ok(signature) if signature == SIGNATURE => Ok(()),
        _ => Err(DecodeError::InvalidSignature),
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum ChunkKind {
    Header,
    Palette,
    PixelData,
    End,
    Unknown([u8; 4]),
}

impl From<[u8; 4]> for ChunkKind {
    fn from(tag: [u8; 4]) -> Self {
        match &tag {
            b"IHDR" => Self::Header,
            b"PLTE" => Self::Palette,
            b"IDAT" => Self::PixelData,
            b"IEND" => Self::End,
            _ => Self::Unknown(tag),
        }
    }
}

impl fmt::Debug for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("IHDR"),
            Self::Palette => f.write_str("PLTE"),
            Self::PixelData => f.write_str("IDAT"),
            Self::End => f.write_str("IEND"),
            Self::Unknown(tag) => write!(f, "{}", String::from_utf8_lossy(tag)),
        }
    }
}

/// The length and tag in front of every chunk. Reading one leaves the reader
/// at the start of the chunk body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ChunkHeader {
    pub(crate) length: u32,
    pub(crate) kind: ChunkKind,
}

impl ChunkHeader {
    pub(crate) fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let length = reader
            .read_u32()
            .map_err(|_| DecodeError::InvalidFormat("truncated chunk length"))?;

        let tag = reader
            .read_array::<4>()
            .map_err(|_| DecodeError::InvalidFormat("truncated chunk type"))?;

        Ok(Self {
            length,
            kind: tag.into(),
        })
    }

    /// Moves past the body and the CRC of a chunk nobody wants.
    pub(crate) fn skip<R: Read>(&self, reader: &mut ByteReader<R>) -> Result<()> {
        reader.skip(u64::from(self.length) + 4)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signature() {
        let mut reader = ByteReader::new(&SIGNATURE[..]);
        assert!(check_signature(&mut reader).is_ok());

        for i in 0..SIGNATURE.len() {
            let mut corrupted = SIGNATURE;
            corrupted[i] ^= 0x01;

            let mut reader = ByteReader::new(&corrupted[..]);
            let err = check_signature(&mut reader).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSignature);
        }
    }

    #[test]
    fn test_short_signature() {
        let mut reader = ByteReader::new(&SIGNATURE[..5]);
        let err = check_signature(&mut reader).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_chunk_header_classifies_tags() {
        let data = [
            0, 0, 0, 13, b'I', b'H', b'D', b'R', //
            0, 0, 0, 6, b'P', b'L', b'T', b'E', //
            0, 0, 1, 0, b'I', b'D', b'A', b'T', //
            0, 0, 0, 0, b'I', b'E', b'N', b'D', //
            0, 0, 0, 4, b'g', b'A', b'M', b'A',
        ];
        let mut reader = ByteReader::new(&data[..]);

        let expected = [
            (13, ChunkKind::Header),
            (6, ChunkKind::Palette),
            (256, ChunkKind::PixelData),
            (0, ChunkKind::End),
            (4, ChunkKind::Unknown(*b"gAMA")),
        ];

        for (length, kind) in expected {
            assert_eq!(ChunkHeader::read(&mut reader).unwrap(), ChunkHeader { length, kind });
        }
    }

    #[test]
    fn test_truncated_chunk_header() {
        let data = [0, 0, 0, 13, b'I', b'H'];
        let mut reader = ByteReader::new(&data[..]);
        let err = ChunkHeader::read(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);

        let mut reader = ByteReader::new(&data[..2]);
        let err = ChunkHeader::read(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_skip_unknown_chunk() {
        let data = [
            0, 0, 0, 2, b't', b'E', b'X', b't', 0xAA, 0xBB, 1, 2, 3, 4, //
            0, 0, 0, 0, b'I', b'E', b'N', b'D',
        ];
        let mut reader = ByteReader::new(&data[..]);

        let unknown = ChunkHeader::read(&mut reader).unwrap();
        assert_eq!(unknown.kind, ChunkKind::Unknown(*b"tEXt"));
        unknown.skip(&mut reader).unwrap();

        assert_eq!(ChunkHeader::read(&mut reader).unwrap().kind, ChunkKind::End);
    }
}
