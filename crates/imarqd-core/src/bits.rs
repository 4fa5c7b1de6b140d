//! Byte/bit packing helpers shared by payload derivation and the codec.

/// Unpacks bytes into MSB-first bits.
#[must_use]
pub fn unpack_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Packs MSB-first bits into bytes, right-padding the final byte with zero
/// bits if `bits.len()` isn't a multiple of 8.
#[must_use]
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            if bit {
                byte |= 1 << (7 - i);
            }
        }
        bytes.push(byte);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trips() {
        let bytes = [0x00u8, 0xFF, 0xA5, 0x01];
        let bits = unpack_bits(&bytes);
        assert_eq!(bits.len(), 32);
        assert_eq!(pack_bits(&bits), bytes);
    }

    #[test]
    fn unpack_is_msb_first() {
        let bits = unpack_bits(&[0b1000_0001]);
        assert_eq!(bits, vec![true, false, false, false, false, false, false, true]);
    }
}
