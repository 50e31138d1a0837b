//! Cyclic binary masks used by the logical (XOR/AND/OR) commands.

use std::{fmt, str::FromStr};

use crate::{bits, errors::InvalidPattern};

/// A nonempty sequence of bits, indexed cyclically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    bits: Vec<bool>,
}

impl Pattern {
    /// Bit `i` of the infinite repetition of this pattern.
    pub fn bit_at(&self, i: usize) -> bool {
        self.bits[i % self.bits.len()]
    }
}

impl FromStr for Pattern {
    type Err = InvalidPattern;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match bits::parse_binary(text) {
            Some(bits) if !bits.is_empty() => Ok(Pattern { bits }),
            _ => Err(InvalidPattern(text.to_string())),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bits::format_binary(&self.bits))
    }
}
