#![no_main]
use libfuzzer_sys::fuzz_target;

use qoif::{decode_header, decode_to_vec, Channels, ColorSpace, Header};

fuzz_target!(|input: (u16, u16, bool, &[u8])| {
    let (w, h, is_4, data) = input;
    let (w, h) = (1 + u32::from(w) % 260, 1 + u32::from(h) % 260);
    let channels = if is_4 { 4 } else { 3 };

    let mut vec = Vec::with_capacity(14 + data.len() + 8);
    vec.extend(b"qoif");
    vec.extend(w.to_be_bytes());
    vec.extend(h.to_be_bytes());
    vec.extend([channels, 0]);
    vec.extend(data);
    vec.extend([0, 0, 0, 0, 0, 0, 0, 1]);

    let header_expected = Header {
        width: w,
        height: h,
        channels: Channels::try_from(channels).unwrap(),
        colorspace: ColorSpace::try_from(0_u8).unwrap(),
    };
    assert_eq!(decode_header(&vec).unwrap(), header_expected);

    if let Ok((header, out)) = decode_to_vec(&vec) {
        assert_eq!(header, header_expected);
        assert_eq!(out.len(), header.n_bytes());
    }
});
