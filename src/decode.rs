#[cfg(any(feature = "alloc", feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::{fs, path::Path};

use bytemuck::cast_slice_mut;

use crate::consts::{
    QOI_HEADER_SIZE, QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA,
    QOI_OP_RUN, QOI_PADDING, QOI_PADDING_SIZE, QOI_RUN_MAX,
};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::pixel::{Pixel, SupportedChannels};
use crate::types::Channels;
use crate::utils::{unlikely, Bytes};

fn qoi_decode_impl<const N: usize>(data: &[u8], out: &mut [u8], n_pixels: usize) -> Result<()>
where
    Pixel<N>: SupportedChannels,
{
    let mut bytes = Bytes::new(&data[QOI_HEADER_SIZE..data.len() - QOI_PADDING_SIZE]);
    let pixels: &mut [[u8; N]] = cast_slice_mut(out);

    // The pixel state is always 4 bytes wide so that alpha carried by RGBA
    // chunks flows into the hash even when the output has 3 channels.
    let mut index = [Pixel::<4>::new(); 64];
    let mut px = Pixel::<4>::new().with_a(0xff);
    let mut pos = 0;

    while pos < n_pixels {
        let b1 = match bytes.read_one() {
            Ok(b1) => b1,
            Err(_) => return Err(Error::PixelCountMismatch { decoded: pos, expected: n_pixels }),
        };

        if b1 == QOI_OP_RGB {
            let [r, g, b] = bytes.read_many()?;
            px.set_r(r);
            px.set_g(g);
            px.set_b(b);
        } else if b1 == QOI_OP_RGBA {
            px = Pixel::from_array(bytes.read_many()?);
        } else {
            match b1 & QOI_MASK_2 {
                QOI_OP_INDEX => {
                    px = index[usize::from(b1)];
                }
                QOI_OP_DIFF => {
                    px.rgb_add(
                        ((b1 >> 4) & 0x03).wrapping_sub(2),
                        ((b1 >> 2) & 0x03).wrapping_sub(2),
                        (b1 & 0x03).wrapping_sub(2),
                    );
                }
                QOI_OP_LUMA => {
                    let b2 = bytes.read_one()?;
                    let vg = (b1 & 0x3f).wrapping_sub(32);
                    let vr = (b2 >> 4).wrapping_sub(8).wrapping_add(vg);
                    let vb = (b2 & 0x0f).wrapping_sub(8).wrapping_add(vg);
                    px.rgb_add(vr, vg, vb);
                }
                _ => {
                    let run = b1 & !QOI_OP_RUN;
                    if unlikely(run >= QOI_RUN_MAX) {
                        return Err(Error::InvalidRunLength { run });
                    }
                    let run = usize::from(run) + 1;
                    if unlikely(run > n_pixels - pos) {
                        return Err(Error::PixelCountMismatch {
                            decoded: pos + run,
                            expected: n_pixels,
                        });
                    }
                    index[usize::from(px.hash_index())] = px;
                    let mut chunk = [0; N];
                    px.write(&mut chunk);
                    pixels[pos..pos + run].fill(chunk);
                    pos += run;
                    continue;
                }
            }
        }

        index[usize::from(px.hash_index())] = px;
        px.write(&mut pixels[pos]);
        pos += 1;
    }

    if unlikely(!bytes.is_empty()) {
        return Err(Error::InvalidPadding);
    }
    Ok(())
}

/// Parses the header of an encoded image without decoding the pixel data.
#[inline]
pub fn decode_header(data: impl AsRef<[u8]>) -> Result<Header> {
    Header::decode(data.as_ref())
}

/// Decodes an image into a pre-allocated output buffer.
///
/// The buffer must be at least [`Header::n_bytes`] bytes long.
pub fn decode_to_buf(buf: &mut [u8], data: impl AsRef<[u8]>) -> Result<Header> {
    let data = data.as_ref();
    if unlikely(data.len() < QOI_HEADER_SIZE + QOI_PADDING_SIZE) {
        return Err(Error::InputBufferTooSmall {
            size: data.len(),
            required: QOI_HEADER_SIZE + QOI_PADDING_SIZE,
        });
    }
    let header = Header::decode(data)?;
    let n_bytes = header.n_bytes();
    if unlikely(buf.len() < n_bytes) {
        return Err(Error::OutputBufferTooSmall { size: buf.len(), required: n_bytes });
    }
    if unlikely(data[data.len() - QOI_PADDING_SIZE..] != QOI_PADDING) {
        return Err(Error::InvalidPadding);
    }
    let out = &mut buf[..n_bytes];
    match header.channels {
        Channels::Rgb => qoi_decode_impl::<3>(data, out, header.n_pixels())?,
        Channels::Rgba => qoi_decode_impl::<4>(data, out, header.n_pixels())?,
    }
    Ok(header)
}

/// Decodes an image into a newly allocated byte vector.
#[cfg(any(feature = "alloc", feature = "std"))]
pub fn decode_to_vec(data: impl AsRef<[u8]>) -> Result<(Header, Vec<u8>)> {
    let data = data.as_ref();
    if unlikely(data.len() < QOI_HEADER_SIZE + QOI_PADDING_SIZE) {
        return Err(Error::InputBufferTooSmall {
            size: data.len(),
            required: QOI_HEADER_SIZE + QOI_PADDING_SIZE,
        });
    }
    let header = Header::decode(data)?;
    let mut out = vec![0; header.n_bytes()];
    let header = decode_to_buf(&mut out, data)?;
    Ok((header, out))
}

/// Reads a file fully into memory and decodes it.
#[cfg(feature = "std")]
pub fn decode_from_file(path: impl AsRef<Path>) -> Result<(Header, Vec<u8>)> {
    decode_to_vec(fs::read(path)?)
}
