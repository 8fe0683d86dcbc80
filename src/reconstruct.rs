use crate::{
    error::{DecodeError, Result},
    header::ImageHeader,
    palette::Palette,
};
use std::slice::ChunksExact;

/// Expands palette indices into RGBA8 pixels.
///
/// Each scanline of `input_buffer` is a filter tag followed by `width` index
/// bytes. Only the "None" filter is accepted, so a scanline maps to a row of
/// pixels directly.
#[derive(Debug)]
pub(crate) struct ScanlineReader<'a> {
    input_buffer: &'a [u8],
    image_header: &'a ImageHeader,
    palette: &'a Palette,
}

impl<'a> ScanlineReader<'a> {
    pub(crate) const fn new(
        input_buffer: &'a [u8],
        image_header: &'a ImageHeader,
        palette: &'a Palette,
    ) -> Self {
        Self {
            input_buffer,
            image_header,
            palette,
        }
    }

    /// Fills `pixels`, which must be exactly `width * height * 4` bytes.
    ///
    /// All scanlines are checked before anything is written, so on error
    /// `pixels` is untouched.
    pub(crate) fn read_lines(&self, pixels: &mut [u8]) -> Result<()> {
        let expected = self.image_header.required_bytes()?;

        if pixels.len() != expected {
            return Err(DecodeError::OutputSize {
                expected,
                actual: pixels.len(),
            });
        }

        let scanlines = self.scanlines()?;
        let bytes_per_row = self.image_header.width as usize * 4;

        for (scanline, row) in scanlines.zip(pixels.chunks_exact_mut(bytes_per_row)) {
            for (&index, pixel) in scanline[1..].iter().zip(row.chunks_exact_mut(4)) {
                pixel.copy_from_slice(&self.palette.color(index).to_le_bytes());
            }
        }

        Ok(())
    }

    /// Every scanline, filter tag included, once all of them check out.
    fn scanlines(&self) -> Result<ChunksExact<'a, u8>> {
        let width = self.image_header.width as usize;
        let height = self.image_header.height as usize;
        let stride = width + 1;

        let input = stride
            .checked_mul(height)
            .and_then(|len| self.input_buffer.get(..len))
            .ok_or(DecodeError::InvalidFormat(
                "image data is shorter than its scanlines",
            ))?;

        for scanline in input.chunks_exact(stride) {
            if scanline[0] != 0 {
                return Err(DecodeError::InvalidFormat(
                    "scanline filtering is not supported",
                ));
            }

            if scanline[1..]
                .iter()
                .any(|&index| index as usize >= self.palette.len())
            {
                return Err(DecodeError::InvalidFormat("palette index out of range"));
            }
        }

        Ok(input.chunks_exact(stride))
    }
}
