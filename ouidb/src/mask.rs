/// Builds a prefix mask `bits / 8` bytes long with the first `ones` bits set,
/// most significant bit first.
///
/// `ones` greater than `bits` is clamped to `bits`, giving an all-`0xff`
/// mask. A `bits` that is not a multiple of 8 is rounded down to whole bytes.
pub fn cidr_mask(ones: usize, bits: usize) -> Vec<u8> {
    let len = bits / 8;
    let mut remaining = ones.min(len * 8);
    let mut mask = vec![0u8; len];

    for byte in mask.iter_mut() {
        if remaining >= 8 {
            *byte = 0xff;
            remaining -= 8;
            continue;
        }
        *byte = !(0xffu8 >> remaining);
        remaining = 0;
    }

    mask
}
