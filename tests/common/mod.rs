pub fn hash<const N: usize>(px: [u8; N]) -> u8 {
    let a = px.get(3).copied().unwrap_or(0xff);
    px[0]
        .wrapping_mul(3)
        .wrapping_add(px[1].wrapping_mul(5))
        .wrapping_add(px[2].wrapping_mul(7))
        .wrapping_add(a.wrapping_mul(11))
        % 64
}
