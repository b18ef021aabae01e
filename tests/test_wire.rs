use rand::{rngs::StdRng, Rng, SeedableRng};

use qoif::{decode_to_vec, encode_to_vec, Error};

const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

fn header_bytes(width: u32, height: u32, channels: u8, colorspace: u8) -> Vec<u8> {
    let mut out = b"qoif".to_vec();
    out.extend(width.to_be_bytes());
    out.extend(height.to_be_bytes());
    out.extend([channels, colorspace]);
    out
}

#[test]
fn test_single_opaque_black_pixel() {
    // equals the implicit previous pixel (0, 0, 0, 255), so it becomes a run
    let encoded = encode_to_vec([0, 0, 0, 255], 1, 1, 4, 0).unwrap();
    let mut expected = header_bytes(1, 1, 4, 0);
    expected.push(0xc0);
    expected.extend(END_MARKER);
    assert_eq!(encoded, expected);
    assert_eq!(encoded.len(), 23);
}

#[test]
fn test_rgb_chunks_for_large_deltas() {
    // a +255 channel delta wraps to -1 mod 256, but wraparound must not make
    // a pixel diff-eligible
    let encoded = encode_to_vec([255, 0, 0, 0, 255, 0], 2, 1, 3, 0).unwrap();
    let mut expected = header_bytes(2, 1, 3, 0);
    expected.extend([0xfe, 255, 0, 0, 0xfe, 0, 255, 0]);
    expected.extend(END_MARKER);
    assert_eq!(encoded, expected);
    assert_eq!(encoded.len(), 30);
}

#[test]
fn test_run_then_small_diff() {
    let encoded = encode_to_vec([0, 0, 0, 255, 1, 0, 0, 255], 2, 1, 4, 0).unwrap();
    assert_eq!(&encoded[14..16], &[0xc0, 0x7a]);
}

#[test]
fn test_luma_chunk() {
    // dg = 10, dr - dg = -2, db - dg = 2
    let encoded = encode_to_vec([8, 10, 12, 255], 1, 1, 4, 0).unwrap();
    assert_eq!(&encoded[14..16], &[0xaa, 0x6a]);
}

#[test]
fn test_index_reuse() {
    let pixels = [10, 20, 30, 200, 50, 60, 10, 20, 30];
    let encoded = encode_to_vec(pixels, 3, 1, 3, 0).unwrap();
    let mut expected = header_bytes(3, 1, 3, 0);
    // third pixel hits the table slot filled by the first one
    expected.extend([0xfe, 10, 20, 30, 0xfe, 200, 50, 60, 0x09]);
    expected.extend(END_MARKER);
    assert_eq!(encoded, expected);
}

#[test]
fn test_max_run_split() {
    // a run of 63 splits into runs of 62 and 1
    let pixels = [0, 0, 0, 255].repeat(63);
    let encoded = encode_to_vec(&pixels, 63, 1, 4, 0).unwrap();
    let mut expected = header_bytes(63, 1, 4, 0);
    expected.extend([0xfd, 0xc0]);
    expected.extend(END_MARKER);
    assert_eq!(encoded, expected);
}

#[test]
fn test_alpha_change_forces_rgba_chunk() {
    let encoded = encode_to_vec([0, 0, 0, 128], 1, 1, 4, 0).unwrap();
    let mut expected = header_bytes(1, 1, 4, 0);
    expected.extend([0xff, 0, 0, 0, 128]);
    expected.extend(END_MARKER);
    assert_eq!(encoded, expected);
}

#[test]
fn test_rgba_chunk_with_rgb_output() {
    // alpha carried by an rgba chunk participates in the hash even when the
    // output drops it: h(1, 2, 3, 4) == 14
    let mut data = header_bytes(2, 1, 3, 0);
    data.extend([0xff, 1, 2, 3, 4, 0x0e]);
    data.extend(END_MARKER);
    let (header, pixels) = decode_to_vec(&data).unwrap();
    assert_eq!(header.channels.as_u8(), 3);
    assert_eq!(pixels, [1, 2, 3, 1, 2, 3]);
}

#[test]
fn test_decode_bad_magic() {
    let mut data = b"abcd".to_vec();
    data.extend([0; 18]);
    assert!(matches!(decode_to_vec(&data), Err(Error::InvalidMagic { .. })));
}

#[test]
fn test_decode_too_short() {
    assert!(matches!(
        decode_to_vec(b"qoif"),
        Err(Error::InputBufferTooSmall { size: 4, required: 22 })
    ));
}

#[test]
fn test_decode_bad_colorspace() {
    let mut data = header_bytes(1, 1, 4, 2);
    data.push(0xc0);
    data.extend(END_MARKER);
    assert!(matches!(decode_to_vec(&data), Err(Error::InvalidColorSpace { colorspace: 2 })));
}

#[test]
fn test_decode_truncated_chunk() {
    // second rgb chunk is cut off
    let mut data = header_bytes(2, 1, 3, 0);
    data.extend([0xfe, 255, 0, 0, 0xfe, 0]);
    data.extend(END_MARKER);
    assert!(matches!(decode_to_vec(&data), Err(Error::UnexpectedBufferEnd)));
}

#[test]
fn test_decode_missing_end_marker() {
    let mut data = header_bytes(1, 1, 3, 0);
    data.extend([0xfe, 1, 2, 3]);
    data.extend([0; 8]);
    assert!(matches!(decode_to_vec(&data), Err(Error::InvalidPadding)));
}

#[test]
fn test_decode_trailing_data() {
    // stray byte between the last chunk and the end marker
    let mut data = header_bytes(1, 1, 3, 0);
    data.extend([0xfe, 1, 2, 3, 0x00]);
    data.extend(END_MARKER);
    assert!(matches!(decode_to_vec(&data), Err(Error::InvalidPadding)));
}

#[test]
fn test_decode_run_overshoot() {
    // run of 5 into a 2-pixel image
    let mut data = header_bytes(2, 1, 4, 0);
    data.push(0xc4);
    data.extend(END_MARKER);
    assert!(matches!(
        decode_to_vec(&data),
        Err(Error::PixelCountMismatch { decoded: 5, expected: 2 })
    ));
}

#[test]
fn test_decode_pixel_shortfall() {
    // chunk section ends before all pixels are produced
    let mut data = header_bytes(3, 1, 4, 0);
    data.push(0xc0);
    data.extend(END_MARKER);
    assert!(matches!(
        decode_to_vec(&data),
        Err(Error::PixelCountMismatch { decoded: 1, expected: 3 })
    ));
}

#[test]
fn test_decode_arbitrary_garbage_is_safe() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..1000 {
        let len = rng.gen_range(0..256);
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        if let Ok((header, pixels)) = decode_to_vec(&data) {
            assert_eq!(pixels.len(), header.n_bytes());
        }
    }

    // same, but starting from a well-formed header so the chunk parser is
    // actually exercised
    for _ in 0..1000 {
        let mut data = header_bytes(4, 4, 4, 0);
        let len = rng.gen_range(0..64);
        data.extend((0..len).map(|_| rng.gen::<u8>()));
        data.extend(END_MARKER);
        if let Ok((header, pixels)) = decode_to_vec(&data) {
            assert_eq!(pixels.len(), header.n_bytes());
        }
    }
}
