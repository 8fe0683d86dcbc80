use std::{collections::TryReserveError, io};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Everything that can go wrong while decoding a PNG.
///
/// Each unsupported header attribute is its own variant so a caller can tell
/// exactly which constraint of the palette subset was violated.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid PNG signature")]
    InvalidSignature,

    #[error("invalid PNG format: {0}")]
    InvalidFormat(&'static str),

    #[error("unsupported bit depth {0}, only 8 is supported")]
    UnsupportedDepth(u8),

    #[error("unsupported color type {0}, only palette (3) is supported")]
    UnsupportedColor(u8),

    #[error("unsupported compression method {0}")]
    UnsupportedCompression(u8),

    #[error("unsupported filter method {0}")]
    UnsupportedFilter(u8),

    #[error("unsupported interlace method {0}")]
    UnsupportedInterlace(u8),

    #[error("file system error: {0}")]
    FileSystem(#[from] io::Error),

    #[error("memory allocation failed: {0}")]
    MemoryAllocation(#[from] TryReserveError),

    #[error("zlib inflate failed: {0}")]
    InflateFailure(String),

    #[error("output buffer holds {actual} bytes, image needs {expected}")]
    OutputSize { expected: usize, actual: usize },
}

/// The payload-free kind of a [`DecodeError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSignature,
    InvalidFormat,
    UnsupportedDepth,
    UnsupportedColor,
    UnsupportedCompression,
    UnsupportedFilter,
    UnsupportedInterlace,
    FileSystem,
    MemoryAllocation,
    InflateFailure,
    OutputSize,
}

impl ErrorKind {
    /// A stable name, suitable for scripts that match on decoder output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidSignature => "InvalidSignature",
            Self::InvalidFormat => "InvalidFormat",
            Self::UnsupportedDepth => "UnsupportedDepth",
            Self::UnsupportedColor => "UnsupportedColor",
            Self::UnsupportedCompression => "UnsupportedCompression",
            Self::UnsupportedFilter => "UnsupportedFilter",
            Self::UnsupportedInterlace => "UnsupportedInterlace",
            Self::FileSystem => "FileSystem",
            Self::MemoryAllocation => "MemoryAllocation",
            Self::InflateFailure => "InflateFailure",
            Self::OutputSize => "OutputSize",
        }
    }
}

impl DecodeError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSignature => ErrorKind::InvalidSignature,
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::UnsupportedDepth(_) => ErrorKind::UnsupportedDepth,
            Self::UnsupportedColor(_) => ErrorKind::UnsupportedColor,
            Self::UnsupportedCompression(_) => ErrorKind::UnsupportedCompression,
            Self::UnsupportedFilter(_) => ErrorKind::UnsupportedFilter,
            Self::UnsupportedInterlace(_) => ErrorKind::UnsupportedInterlace,
            Self::FileSystem(_) => ErrorKind::FileSystem,
            Self::MemoryAllocation(_) => ErrorKind::MemoryAllocation,
            Self::InflateFailure(_) => ErrorKind::InflateFailure,
            Self::OutputSize { .. } => ErrorKind::OutputSize,
        }
    }
}

/// Names the outcome of a decode: the error kind's stable name, or an empty
/// string on success.
pub fn describe<T>(result: &Result<T>) -> &'static str {
    match result {
        Ok(_) => "",
        Err(err) => err.kind().name(),
    }
}
