//! Decoded commands of the edit language.

use std::fmt;

use crate::{bits, block::ChunkOp, pattern::Pattern};

/// Bitwise operator of the `x`, `a` and `o` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    Xor,
    And,
    Or,
}

impl LogicalOp {
    pub fn apply(self, bit: bool, mask: bool) -> bool {
        match self {
            LogicalOp::Xor => bit ^ mask,
            LogicalOp::And => bit & mask,
            LogicalOp::Or => bit | mask,
        }
    }

    /// The command character that selects this operator.
    pub fn symbol(self) -> char {
        match self {
            LogicalOp::Xor => 'x',
            LogicalOp::And => 'a',
            LogicalOp::Or => 'o',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogicalOp::Xor => "XOR",
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }

    pub(crate) fn from_symbol(c: u8) -> Option<Self> {
        match c {
            b'x' => Some(LogicalOp::Xor),
            b'a' => Some(LogicalOp::And),
            b'o' => Some(LogicalOp::Or),
            _ => None,
        }
    }
}

/// One step of a program. Counts are in bits and are clamped to the remaining
/// range at execution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Copy `n` input bits to the output.
    Take(usize),
    /// Advance past `n` input bits.
    Skip(usize),
    /// Append literal bits without consuming input.
    Insert(Vec<bool>),
    /// Append the complement of `n` input bits.
    Invert(usize),
    /// Append `n` input bits in reverse order.
    ReverseBits(usize),
    /// Append `n` input bits with their byte order reversed. `n` is a multiple of 8.
    ByteSwap(usize),
    /// Append `n` input bits combined with a repeating pattern.
    Logical {
        op: LogicalOp,
        count: usize,
        pattern: Pattern,
    },
    /// Run `chain` over the next `count` input bits and append the result.
    Block { chain: Vec<ChunkOp>, count: usize },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Take(_) => "Take",
            Command::Skip(_) => "Skip",
            Command::Insert(_) => "Insert",
            Command::Invert(_) => "Invert",
            Command::ReverseBits(_) => "Reverse Bits",
            Command::ByteSwap(_) => "Byte-Swap",
            Command::Logical { op, .. } => op.name(),
            Command::Block { .. } => "Block",
        }
    }

    /// Requested number of input bits this command consumes, before clamping.
    pub fn count(&self) -> usize {
        match self {
            Command::Insert(_) => 0,
            Command::Take(n)
            | Command::Skip(n)
            | Command::Invert(n)
            | Command::ReverseBits(n)
            | Command::ByteSwap(n) => *n,
            Command::Logical { count, .. } | Command::Block { count, .. } => *count,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Take(n) => write!(f, "t{n}"),
            Command::Skip(n) => write!(f, "s{n}"),
            Command::Insert(literal) => write!(f, "i{}", bits::format_binary(literal)),
            Command::Invert(n) => write!(f, "n{n}"),
            Command::ReverseBits(n) => write!(f, "v{n}"),
            Command::ByteSwap(n) => write!(f, "b{n}"),
            Command::Logical { op, count, pattern } => {
                write!(f, "{}{count}:{pattern}", op.symbol())
            }
            Command::Block { chain, count } => {
                f.write_str("[")?;
                for op in chain {
                    write!(f, "{op}")?;
                }
                write!(f, "]{count}")
            }
        }
    }
}
