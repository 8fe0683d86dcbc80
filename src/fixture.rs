//! Builds PNG files in memory for tests.

use super::SIGNATURE;
use flate2::{write::ZlibEncoder, Compression};
use std::io::Write;

#[derive(Debug, Default)]
pub struct PngBuilder {
    bytes: Vec<u8>,
}

impl PngBuilder {
    pub fn new() -> Self {
        Self {
            bytes: SIGNATURE.to_vec(),
        }
    }

    pub fn chunk(mut self, name: &[u8; 4], data: &[u8]) -> Self {
        self.bytes
            .extend_from_slice(&(data.len() as u32).to_be_bytes());
        self.bytes.extend_from_slice(name);

        let mut hash_data = Vec::new();
        hash_data.extend_from_slice(name);
        hash_data.extend_from_slice(data);

        self.bytes.extend_from_slice(data);
        self.bytes
            .extend_from_slice(&crc32fast::hash(&hash_data).to_be_bytes());

        self
    }

    pub fn ihdr(self, width: u32, height: u32) -> Self {
        self.ihdr_with(width, height, [8, 3, 0, 0, 0])
    }

    /// `modes` is bit depth, color type, compression, filter and interlace.
    pub fn ihdr_with(self, width: u32, height: u32, modes: [u8; 5]) -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&width.to_be_bytes());
        buffer.extend_from_slice(&height.to_be_bytes());
        buffer.extend_from_slice(&modes);

        self.chunk(b"IHDR", &buffer)
    }

    pub fn plte(self, colors: &[[u8; 3]]) -> Self {
        let data: Vec<u8> = colors.iter().flatten().copied().collect();
        self.chunk(b"PLTE", &data)
    }

    pub fn idat(self, data: &[u8]) -> Self {
        self.chunk(b"IDAT", data)
    }

    pub fn iend(self) -> Self {
        self.chunk(b"IEND", &[])
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Prefixes every row of `indices` with a filter tag of 0.
pub fn scanlines(width: usize, indices: &[u8]) -> Vec<u8> {
    indices
        .chunks(width)
        .flat_map(|row| std::iter::once(0).chain(row.iter().copied()))
        .collect()
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// A complete, valid palette PNG with all of its pixel data in one IDAT chunk.
pub fn indexed_png(width: u32, height: u32, palette: &[[u8; 3]], indices: &[u8]) -> Vec<u8> {
    assert_eq!(indices.len(), (width * height) as usize);

    PngBuilder::new()
        .ihdr(width, height)
        .plte(palette)
        .idat(&zlib(&scanlines(width as usize, indices)))
        .iend()
        .build()
}

/// The RGBA8 bytes a palette decode is expected to produce.
pub fn expected_rgba(palette: &[[u8; 3]], indices: &[u8]) -> Vec<u8> {
    indices
        .iter()
        .flat_map(|&i| {
            let [r, g, b] = palette[i as usize];
            let alpha = if i == 0 { 0x00 } else { 0xFF };
            [r, g, b, alpha]
        })
        .collect()
}

/// Deterministic pseudo-random bytes.
pub fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed >> 24) as u8
        })
        .collect()
}
