//! Chunk transforms shared by the outer engine and block chains.
//!
//! Every transform here works in place on an already extracted chunk and never
//! touches the cursor. [ChunkOp] is the restricted command set allowed inside
//! `[...]` blocks; stream commands (take, skip, insert) have no representation
//! in it, so a chain can only ever reshape the chunk it was given.

use std::fmt;

use crate::{command::LogicalOp, pattern::Pattern};

/// Flips every bit of `chunk`.
pub fn invert(chunk: &mut [bool]) {
    for bit in chunk.iter_mut() {
        *bit = !*bit;
    }
}

/// Reverses the bit order of the whole `chunk`.
pub fn reverse(chunk: &mut [bool]) {
    chunk.reverse();
}

/// Reverses the order of the whole bytes in `chunk`, keeping bit order inside each byte.
///
/// A trailing partial byte (when `chunk.len()` is not a multiple of 8) stays
/// where it is, after the swapped bytes.
pub fn byte_swap(chunk: &mut [bool]) {
    let whole = chunk.len() / 8 * 8;
    let bytes = &mut chunk[..whole];

    bytes.reverse();
    for byte in bytes.chunks_exact_mut(8) {
        byte.reverse();
    }
}

/// Combines `chunk[i]` with `pattern.bit_at(i)` using `op`.
pub fn mask(chunk: &mut [bool], op: LogicalOp, pattern: &Pattern) {
    for (i, bit) in chunk.iter_mut().enumerate() {
        *bit = op.apply(*bit, pattern.bit_at(i));
    }
}

/// A transform-only command, as allowed inside a block chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOp {
    Invert,
    ReverseBits,
    ByteSwap,
    Logical { op: LogicalOp, pattern: Pattern },
}

impl ChunkOp {
    /// Applies this transform to the whole chunk.
    pub fn apply(&self, chunk: &mut [bool]) {
        match self {
            ChunkOp::Invert => invert(chunk),
            ChunkOp::ReverseBits => reverse(chunk),
            ChunkOp::ByteSwap => byte_swap(chunk),
            ChunkOp::Logical { op, pattern } => mask(chunk, *op, pattern),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChunkOp::Invert => "Invert",
            ChunkOp::ReverseBits => "Reverse Bits",
            ChunkOp::ByteSwap => "Byte-Swap",
            ChunkOp::Logical { op, .. } => op.name(),
        }
    }
}

impl fmt::Display for ChunkOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkOp::Invert => f.write_str("n"),
            ChunkOp::ReverseBits => f.write_str("v"),
            ChunkOp::ByteSwap => f.write_str("b"),
            ChunkOp::Logical { op, pattern } => write!(f, "{}:{}", op.symbol(), pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{pack_to_bits, unpack_from_bits};

    fn run(op: &ChunkOp, data: &[u8]) -> Vec<u8> {
        let mut chunk = pack_to_bits(data);
        op.apply(&mut chunk);
        unpack_from_bits(&chunk)
    }

    #[test]
    fn test_invert() {
        assert_eq!(run(&ChunkOp::Invert, &[0xB0, 0x0F]), vec![0x4F, 0xF0]);
    }

    #[test]
    fn test_reverse_bits() {
        assert_eq!(run(&ChunkOp::ReverseBits, &[0xB0]), vec![0x0D]);
        assert_eq!(run(&ChunkOp::ReverseBits, &[0x01, 0x00]), vec![0x00, 0x80]);
    }

    #[test]
    fn test_byte_swap() {
        assert_eq!(
            run(&ChunkOp::ByteSwap, &[0x01, 0x02, 0x03, 0x04]),
            vec![0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_byte_swap_keeps_partial_tail() {
        // 0xAB, 0xCD, then the 4 bits 1010.
        let mut chunk = pack_to_bits(&[0xAB, 0xCD]);
        chunk.extend([true, false, true, false]);

        byte_swap(&mut chunk);

        let mut expected = pack_to_bits(&[0xCD, 0xAB]);
        expected.extend([true, false, true, false]);
        assert_eq!(chunk, expected);
    }

    #[test]
    fn test_byte_swap_shorter_than_a_byte() {
        let mut chunk = vec![true, false, false];
        byte_swap(&mut chunk);
        assert_eq!(chunk, vec![true, false, false]);
    }

    #[test]
    fn test_mask_ops() {
        let pattern: Pattern = "1100".parse().unwrap();
        let xor = ChunkOp::Logical {
            op: LogicalOp::Xor,
            pattern: pattern.clone(),
        };
        let and = ChunkOp::Logical {
            op: LogicalOp::And,
            pattern: pattern.clone(),
        };
        let or = ChunkOp::Logical {
            op: LogicalOp::Or,
            pattern,
        };

        assert_eq!(run(&xor, &[0b1010_1010]), vec![0b0110_0110]);
        assert_eq!(run(&and, &[0b1010_1010]), vec![0b1000_1000]);
        assert_eq!(run(&or, &[0b1010_1010]), vec![0b1110_1110]);
    }

    #[test]
    fn test_display() {
        let op = ChunkOp::Logical {
            op: LogicalOp::And,
            pattern: "11110000".parse().unwrap(),
        };
        assert_eq!(op.to_string(), "a:11110000");
        assert_eq!(ChunkOp::ReverseBits.to_string(), "v");
    }
}
