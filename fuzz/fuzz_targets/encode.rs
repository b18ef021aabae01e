#![no_main]
use libfuzzer_sys::fuzz_target;

use qoif::{decode_to_vec, encode_to_vec};

fuzz_target!(|input: (bool, u8, &[u8])| {
    let (is_4, w, data) = input;
    let channels = if is_4 { 4 } else { 3 };
    let w = 1 + usize::from(w) % 254;
    let h = data.len() / usize::from(channels) / w;
    if h == 0 {
        return;
    }
    let data = &data[..w * h * usize::from(channels)];

    let encoded = encode_to_vec(data, w as u32, h as u32, channels, 0).unwrap();
    let (header, decoded) = decode_to_vec(&encoded).unwrap();
    assert_eq!(decoded, data);
    assert_eq!(header.n_bytes(), data.len());
});
