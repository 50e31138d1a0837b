//! Conversion between byte slices and single-bit sequences.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.

/// Expands `data` into `8 * data.len()` bits, MSB-first per byte.
pub fn pack_to_bits(data: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(data.len() * 8);

    for &byte in data {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }

    bits
}

/// Packs bits back into bytes, MSB-first. A trailing partial byte is zero-padded.
pub fn unpack_from_bits(bits: &[bool]) -> Vec<u8> {
    let mut out = vec![0u8; bits.len().div_ceil(8)];

    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            out[i / 8] |= 1 << (7 - i % 8);
        }
    }

    out
}

/// Parses a literal of `0`/`1` characters into bits. Returns `None` on any other character.
pub fn parse_binary(text: &str) -> Option<Vec<bool>> {
    text.bytes()
        .map(|c| match c {
            b'0' => Some(false),
            b'1' => Some(true),
            _ => None,
        })
        .collect()
}

/// Renders bits as a `0`/`1` string.
pub fn format_binary(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_msb_first() {
        let bits = pack_to_bits(&[0xB0]);
        assert_eq!(
            bits,
            vec![true, false, true, true, false, false, false, false]
        );
    }

    #[test]
    fn test_unpack_pads_partial_byte() {
        assert_eq!(unpack_from_bits(&[true, true, false, true]), vec![0b1101_0000]);
        assert_eq!(unpack_from_bits(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_unpack_nine_bits() {
        let mut bits = vec![true; 8];
        bits.push(true);
        assert_eq!(unpack_from_bits(&bits), vec![0xFF, 0x80]);
    }

    #[test]
    fn test_partial_byte_round_trip_loses_padding() {
        let bits = vec![true, false, true];
        let repacked = pack_to_bits(&unpack_from_bits(&bits));
        assert_eq!(repacked.len(), 8);
        assert_eq!(&repacked[..3], &bits[..]);
    }

    #[test]
    fn test_parse_binary() {
        assert_eq!(parse_binary("101"), Some(vec![true, false, true]));
        assert_eq!(parse_binary(""), Some(vec![]));
        assert_eq!(parse_binary("102"), None);
    }

    #[test]
    fn test_format_binary() {
        assert_eq!(format_binary(&[true, false, false, true]), "1001");
    }

    proptest! {
        #[test]
        fn prop_bytes_round_trip(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(unpack_from_bits(&pack_to_bits(&data)), data);
        }

        #[test]
        fn prop_pack_length(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(pack_to_bits(&data).len(), data.len() * 8);
        }
    }
}
