//! The `[start, end)` window over the input and the read cursor that walks it.

use crate::errors::RangeError;

/// Inclusive-start, exclusive-end window into the input bits.
///
/// Always satisfies `start <= end <= len(input)` once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub start: usize,
    pub end: usize,
}

impl BitRange {
    /// Validates the caller's bounds against an input of `len` bits.
    ///
    /// An `end` of 0 or past the input means "to the end of the input".
    pub fn resolve(start: usize, end: usize, len: usize) -> Result<Self, RangeError> {
        if start > len {
            return Err(RangeError::StartOutOfBounds { start, len });
        }

        let end = if end == 0 || end > len { len } else { end };

        if start > end {
            return Err(RangeError::StartAfterEnd { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Read position over `input`, confined to a [BitRange].
///
/// The position only moves forward and never passes `range.end`; every read
/// is clamped to the bits that remain.
pub struct Cursor<'a> {
    input: &'a [bool],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a [bool], range: BitRange) -> Self {
        Self {
            input,
            pos: range.start,
            end: range.end,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.end
    }

    /// Consumes up to `n` bits and returns them.
    pub fn take(&mut self, n: usize) -> &'a [bool] {
        let len = n.min(self.remaining());
        let chunk = &self.input[self.pos..self.pos + len];
        self.pos += len;
        chunk
    }

    /// Advances past up to `n` bits.
    pub fn skip(&mut self, n: usize) {
        self.pos += n.min(self.remaining());
    }
}
