/// Lookup table mapping every byte to its bit-reversed value. Built once at compile time
/// and shared read-only by the compressor and the decompressor.
pub static BIT_REVERSE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0_u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut x = i as u8;
        // Swap adjacent bits, then pairs, then nibbles
        x = ((x >> 1) & 0x55) | ((x << 1) & 0xAA);
        x = ((x >> 2) & 0x33) | ((x << 2) & 0xCC);
        x = ((x >> 4) & 0x0F) | ((x << 4) & 0xF0);
        table[i] = x;
        i += 1;
    }
    table
}

/// Returns the byte with its bit order reversed (bit 0 becomes bit 7, etc.).
#[inline]
pub fn bit_reverse(byte: u8) -> u8 {
    BIT_REVERSE[byte as usize]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_values_test() {
        assert_eq!(bit_reverse(0x00), 0x00);
        assert_eq!(bit_reverse(0x01), 0x80);
        assert_eq!(bit_reverse(0x0F), 0xF0);
        assert_eq!(bit_reverse(0b1100_1010), 0b0101_0011);
        assert_eq!(bit_reverse(0xFF), 0xFF);
    }

    #[test]
    fn matches_reverse_bits_test() {
        for b in 0..=255_u8 {
            assert_eq!(bit_reverse(b), b.reverse_bits());
        }
    }

    #[test]
    fn involution_test() {
        for b in 0..=255_u8 {
            assert_eq!(bit_reverse(bit_reverse(b)), b);
        }
    }
}
