use core::fmt::{self, Display};

use crate::consts::{QOI_MAGIC, QOI_PIXELS_MAX, QOI_RUN_MAX};

/// Errors that can occur during encoding or decoding.
#[derive(Debug)]
pub enum Error {
    InvalidChannels { channels: u8 },
    InvalidColorSpace { colorspace: u8 },
    EmptyImage { width: u32, height: u32 },
    ImageTooLarge { width: u32, height: u32 },
    BadEncodingDataSize { size: usize, expected: usize },
    InputBufferTooSmall { size: usize, required: usize },
    OutputBufferTooSmall { size: usize, required: usize },
    InvalidMagic { magic: u32 },
    UnexpectedBufferEnd,
    InvalidRunLength { run: u8 },
    PixelCountMismatch { decoded: usize, expected: usize },
    InvalidPadding,
    #[cfg(feature = "std")]
    IoError(std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidChannels { channels } => {
                write!(f, "invalid number of channels: {}", channels)
            }
            Self::InvalidColorSpace { colorspace } => {
                write!(f, "invalid color space: {} (expected 0 or 1)", colorspace)
            }
            Self::EmptyImage { width, height } => {
                write!(f, "image contains no pixels: {}x{}", width, height)
            }
            Self::ImageTooLarge { width, height } => {
                let mp = QOI_PIXELS_MAX / 1_000_000;
                write!(f, "image is too large: {}x{} (max={}Mp)", width, height, mp)
            }
            Self::BadEncodingDataSize { size, expected } => {
                write!(f, "bad data size when encoding: {} (expected: {})", size, expected)
            }
            Self::InputBufferTooSmall { size, required } => {
                write!(f, "input buffer size too small: {} (minimum required: {})", size, required)
            }
            Self::OutputBufferTooSmall { size, required } => {
                write!(f, "output buffer size too small: {} (minimum required: {})", size, required)
            }
            Self::InvalidMagic { magic } => {
                write!(f, "invalid magic: expected {:08x?}, got {:08x?}", QOI_MAGIC, magic)
            }
            Self::UnexpectedBufferEnd => {
                write!(f, "unexpected input buffer end while decoding")
            }
            Self::InvalidRunLength { run } => {
                write!(f, "invalid run length: {} (max={})", run, QOI_RUN_MAX)
            }
            Self::PixelCountMismatch { decoded, expected } => {
                write!(f, "decoded pixel count mismatch: {} (expected: {})", decoded, expected)
            }
            Self::InvalidPadding => {
                write!(f, "stream is not terminated by the 8-byte end marker")
            }
            #[cfg(feature = "std")]
            Self::IoError(err) => {
                write!(f, "i/o error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}
