//! Fast encoder/decoder for the [QOI image format](https://qoiformat.org/).
//!
//! A QOI stream is a 14-byte header, any number of variable-length chunks
//! each encoding one pixel or a run of identical pixels, and an 8-byte end
//! marker. Both sides of the codec share the same running state: a 64-entry
//! table of recently seen pixels keyed by a hash of the channel values, and
//! the previously processed pixel.
//!
//! # Examples
//!
//! Encode a raw RGBA buffer and decode it back:
//!
//! ```
//! use qoif::{decode_to_vec, encode_to_vec};
//!
//! let pixels = [100, 120, 140, 255, 100, 120, 140, 255];
//! let encoded = encode_to_vec(&pixels, 2, 1, 4, 0)?;
//! let (header, decoded) = decode_to_vec(&encoded)?;
//! assert_eq!(header.width, 2);
//! assert_eq!(decoded, pixels);
//! # Ok::<(), qoif::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::inline_always,
    clippy::similar_names,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::cargo_common_metadata
)]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#[cfg(all(feature = "alloc", not(any(feature = "std", test))))]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std as alloc;

mod decode;
mod encode;
mod error;
mod header;
mod pixel;
mod types;
mod utils;

#[doc(hidden)]
pub mod consts;

#[cfg(feature = "std")]
pub use crate::decode::decode_from_file;
#[cfg(any(feature = "alloc", feature = "std"))]
pub use crate::decode::decode_to_vec;
pub use crate::decode::{decode_header, decode_to_buf};

#[cfg(feature = "std")]
pub use crate::encode::encode_to_file;
#[cfg(any(feature = "alloc", feature = "std"))]
pub use crate::encode::encode_to_vec;
pub use crate::encode::{encode_size_limit, encode_to_buf};

pub use crate::error::{Error, Result};
pub use crate::header::Header;
pub use crate::types::{Channels, ColorSpace};
