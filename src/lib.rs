#![warn(clippy::nursery)]

//! A decoder for 8-bit, palette-indexed, non-interlaced PNG images.
//!
//! Decoding is split in two calls so the caller owns the pixel buffer:
//! [`stat`] reads only the header and reports how many bytes the image needs,
//! and [`load`] decodes the image into a buffer of exactly that size.
//!
//! ```no_run
//! let info = palpng::stat("image.png")?;
//! let mut pixels = vec![0; info.required_bytes];
//! palpng::load("image.png", &mut pixels)?;
//! # Ok::<(), palpng::DecodeError>(())
//! ```
//!
//! Pixels come out as RGBA8. The decoder has no transparency chunk support,
//! so palette entry 0 is taken to be fully transparent and every other entry
//! opaque.

mod chunk;
mod decoder;
mod error;
mod header;
mod inflate;
mod palette;
mod reader;
mod reconstruct;
pub mod util;

#[cfg(test)]
mod fixture;

pub use chunk::SIGNATURE;
pub use decoder::*;
pub use error::*;
pub use header::{ImageHeader, ImageInfo};
pub use inflate::INFLATE_INCREMENT;
pub use palette::MAX_PALETTE_ENTRIES;
