use crate::{
    error::{DecodeError, Result},
    reader::ByteReader,
};
use std::io::Read;

pub const MAX_PALETTE_ENTRIES: usize = 256;

/// Indexed colors packed as little-endian RGBA: `R | G << 8 | B << 16 | A << 24`.
///
/// Entry 0 is fully transparent and every other entry is opaque. There's no
/// transparency chunk support, so this stands in for one.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Palette {
    colors: [u32; MAX_PALETTE_ENTRIES],
    len: usize,
}

impl Palette {
    pub(crate) fn read<R: Read>(reader: &mut ByteReader<R>, length: u32) -> Result<Self> {
        let length = length as usize;

        if length % 3 != 0 {
            return Err(DecodeError::InvalidFormat(
                "palette length not divisible by 3",
            ));
        }

        let len = length / 3;

        if len > MAX_PALETTE_ENTRIES {
            return Err(DecodeError::InvalidFormat(
                "palette holds more than 256 entries",
            ));
        }

        let mut colors = [0; MAX_PALETTE_ENTRIES];

        for (i, color) in colors.iter_mut().take(len).enumerate() {
            let [r, g, b] = reader.read_array::<3>()?;
            let alpha = if i == 0 { 0x00 } else { 0xFF };

            *color = u32::from_le_bytes([r, g, b, alpha]);
        }

        reader.skip_crc()?;

        Ok(Self { colors, len })
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Entries at or past `len()` read as zero, callers range-check first.
    pub(crate) const fn color(&self, index: u8) -> u32 {
        self.colors[index as usize]
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // currently prints no more than 4 palette entries
        f.debug_struct("Palette")
            .field("colors", &&self.colors[..self.len.min(4)])
            .field("len", &self.len)
            .finish()
    }
}
