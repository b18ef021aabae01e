#[cfg(any(feature = "alloc", feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::{fs, path::Path};

use bytemuck::cast_slice;

use crate::consts::{
    QOI_HEADER_SIZE, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN,
    QOI_PADDING, QOI_PADDING_SIZE, QOI_RUN_MAX,
};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::pixel::{Pixel, SupportedChannels};
use crate::types::Channels;
use crate::utils::unlikely;

// Callers guarantee the buffer is at least `encode_size_limit` bytes long, so
// all writes stay in bounds.
struct WriteBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteBuf<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn push(&mut self, v: u8) {
        self.buf[self.pos] = v;
        self.pos += 1;
    }

    #[inline]
    fn write<const M: usize>(&mut self, v: [u8; M]) {
        self.buf[self.pos..self.pos + M].copy_from_slice(&v);
        self.pos += M;
    }

    #[inline]
    const fn len(&self) -> usize {
        self.pos
    }
}

fn qoi_encode_impl<const N: usize>(out: &mut [u8], data: &[u8], header: &Header) -> Result<usize>
where
    Pixel<N>: SupportedChannels,
{
    let mut buf = WriteBuf::new(out);
    buf.write(header.encode());

    let mut index = [Pixel::<4>::new(); 64];
    let mut px_prev = Pixel::<4>::new().with_a(0xff);
    let mut run = 0_u8;

    let pixels: &[[u8; N]] = cast_slice(data);
    let n_pixels = pixels.len();

    for (i, chunk) in pixels.iter().enumerate() {
        let px = Pixel::from_array(*chunk).as_rgba(0xff);
        let index_pos = px.hash_index();

        if px == px_prev {
            run += 1;
            if run == QOI_RUN_MAX || i == n_pixels - 1 {
                buf.push(QOI_OP_RUN | (run - 1));
                run = 0;
            }
        } else {
            if run != 0 {
                buf.push(QOI_OP_RUN | (run - 1));
                run = 0;
            }
            if index[usize::from(index_pos)] == px {
                buf.push(QOI_OP_INDEX | index_pos);
            } else {
                // Delta eligibility is decided on widened signed differences;
                // mod-256 wraparound that happens to land in range does not
                // qualify, so the decoder's wrapping add reconstructs exactly.
                let vr = i16::from(px.r()) - i16::from(px_prev.r());
                let vg = i16::from(px.g()) - i16::from(px_prev.g());
                let vb = i16::from(px.b()) - i16::from(px_prev.b());
                let va = i16::from(px.a_or(0xff)) - i16::from(px_prev.a_or(0xff));

                if va != 0 {
                    buf.push(QOI_OP_RGBA);
                    buf.write([px.r(), px.g(), px.b(), px.a_or(0xff)]);
                } else {
                    let (vr_2, vg_2, vb_2) = (vr + 2, vg + 2, vb + 2);
                    let vg_32 = vg + 32;
                    let (vr_vg_8, vb_vg_8) = (vr - vg + 8, vb - vg + 8);

                    if vr_2 | vg_2 | vb_2 | 3 == 3 {
                        buf.push(QOI_OP_DIFF | (vr_2 << 4 | vg_2 << 2 | vb_2) as u8);
                    } else if vg_32 | 63 == 63 && vr_vg_8 | vb_vg_8 | 15 == 15 {
                        buf.write([QOI_OP_LUMA | vg_32 as u8, (vr_vg_8 << 4 | vb_vg_8) as u8]);
                    } else {
                        buf.push(QOI_OP_RGB);
                        buf.write([px.r(), px.g(), px.b()]);
                    }
                }
            }
        }

        index[usize::from(index_pos)] = px;
        px_prev = px;
    }

    buf.write(QOI_PADDING);
    Ok(buf.len())
}

/// Returns the maximum number of bytes the encoded image can occupy.
#[inline]
pub fn encode_size_limit(width: u32, height: u32, channels: impl Into<u8>) -> usize {
    QOI_HEADER_SIZE
        + (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(usize::from(channels.into()) + 1)
        + QOI_PADDING_SIZE
}

/// Encodes an image into a pre-allocated output buffer.
///
/// The buffer must be at least [`encode_size_limit`] bytes long; returns the
/// number of bytes actually written.
pub fn encode_to_buf(
    buf: &mut [u8], data: impl AsRef<[u8]>, width: u32, height: u32, channels: u8, colorspace: u8,
) -> Result<usize> {
    let data = data.as_ref();
    let header = Header::try_new(width, height, channels.try_into()?, colorspace.try_into()?)?;
    if unlikely(data.len() != header.n_bytes()) {
        return Err(Error::BadEncodingDataSize { size: data.len(), expected: header.n_bytes() });
    }
    let max_len = encode_size_limit(width, height, header.channels);
    if unlikely(buf.len() < max_len) {
        return Err(Error::OutputBufferTooSmall { size: buf.len(), required: max_len });
    }
    match header.channels {
        Channels::Rgb => qoi_encode_impl::<3>(buf, data, &header),
        Channels::Rgba => qoi_encode_impl::<4>(buf, data, &header),
    }
}

/// Encodes an image into a newly allocated byte vector.
#[cfg(any(feature = "alloc", feature = "std"))]
pub fn encode_to_vec(
    data: impl AsRef<[u8]>, width: u32, height: u32, channels: u8, colorspace: u8,
) -> Result<Vec<u8>> {
    let mut out = vec![0_u8; encode_size_limit(width, height, Channels::try_from(channels)?)];
    let size = encode_to_buf(&mut out, data, width, height, channels, colorspace)?;
    out.truncate(size);
    Ok(out)
}

/// Encodes an image and writes the result to a file.
#[cfg(feature = "std")]
pub fn encode_to_file(
    data: impl AsRef<[u8]>, width: u32, height: u32, channels: u8, colorspace: u8,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let out = encode_to_vec(data, width, height, channels, colorspace)?;
    fs::write(path, &out)?;
    Ok(out.len())
}
