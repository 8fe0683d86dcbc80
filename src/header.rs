use crate::{
    error::{DecodeError, Result},
    reader::ByteReader,
};
use std::io::Read;

pub(crate) const IHDR_LENGTH: u32 = 13;

const PALETTE_COLOR_TYPE: u8 = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,

    // Compression, filter and interlace method should always be 0 for the
    // images this crate decodes.
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}

/// What a caller needs to know before handing over an output buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub required_bytes: usize,
    pub width: u32,
    pub height: u32,
}

impl ImageHeader {
    /// Parses an IHDR body of `length` bytes and leaves the reader past its
    /// CRC.
    pub(crate) fn read<R: Read>(reader: &mut ByteReader<R>, length: u32) -> Result<Self> {
        if length != IHDR_LENGTH {
            return Err(DecodeError::InvalidFormat("image header must be 13 bytes"));
        }

        let header = Self {
            width: reader.read_u32()?,
            height: reader.read_u32()?,
            bit_depth: reader.read_u8()?,
            color_type: reader.read_u8()?,
            compression_method: reader.read_u8()?,
            filter_method: reader.read_u8()?,
            interlace_method: reader.read_u8()?,
        };

        header.validate()?;
        reader.skip_crc()?;

        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.bit_depth != 8 {
            return Err(DecodeError::UnsupportedDepth(self.bit_depth));
        }

        if self.color_type != PALETTE_COLOR_TYPE {
            return Err(DecodeError::UnsupportedColor(self.color_type));
        }

        if self.compression_method != 0 {
            return Err(DecodeError::UnsupportedCompression(
                self.compression_method,
            ));
        }

        if self.filter_method != 0 {
            return Err(DecodeError::UnsupportedFilter(self.filter_method));
        }

        if self.interlace_method != 0 {
            return Err(DecodeError::UnsupportedInterlace(self.interlace_method));
        }

        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::InvalidFormat("image has a zero dimension"));
        }

        self.required_bytes().map(|_| ())
    }

    /// Size of the RGBA8 buffer this image decodes into.
    pub fn required_bytes(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(DecodeError::InvalidFormat("image dimensions overflow"))
    }

    pub fn info(&self) -> Result<ImageInfo> {
        Ok(ImageInfo {
            required_bytes: self.required_bytes()?,
            width: self.width,
            height: self.height,
        })
    }
}
