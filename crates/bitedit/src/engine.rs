//! Replays a compiled program over the input until the range is used up.

use crate::{
    block,
    command::Command,
    errors::EditError,
    range::{BitRange, Cursor},
    trace::Trace,
};

/// Owns the cursor and the output for a single run.
pub struct Engine<'a> {
    cursor: Cursor<'a>,
    output: Vec<bool>,
}

impl<'a> Engine<'a> {
    pub fn new(input: &'a [bool], range: BitRange) -> Self {
        Self {
            cursor: Cursor::new(input, range),
            output: Vec::with_capacity(range.len()),
        }
    }

    /// Runs `commands` in order, over and over, until the range is exhausted.
    ///
    /// A pass stops early as soon as the cursor reaches the end of the range.
    /// An empty program yields empty output. A pass that consumes no input
    /// fails with [EditError::Stalled].
    pub fn run<T: Trace + ?Sized>(
        mut self,
        commands: &[Command],
        trace: &mut T,
    ) -> Result<Vec<bool>, EditError> {
        let mut pass = 0;

        while !self.cursor.is_exhausted() && !commands.is_empty() {
            let pass_start = self.cursor.position();

            for command in commands {
                if self.cursor.is_exhausted() {
                    break;
                }

                trace.command(pass, self.cursor.position(), command);
                let written = self.output.len();
                self.execute(command, pass, trace);
                trace.wrote(pass, command, self.output.len() - written);
            }

            if self.cursor.position() == pass_start {
                return Err(EditError::Stalled {
                    pass,
                    position: pass_start,
                });
            }

            pass += 1;
        }

        Ok(self.output)
    }

    fn execute<T: Trace + ?Sized>(&mut self, command: &Command, pass: usize, trace: &mut T) {
        match command {
            Command::Take(n) => {
                let chunk = self.cursor.take(*n);
                self.output.extend_from_slice(chunk);
            }
            Command::Skip(n) => self.cursor.skip(*n),
            Command::Insert(literal) => self.output.extend_from_slice(literal),
            Command::Invert(n) => block::invert(self.append_chunk(*n)),
            Command::ReverseBits(n) => block::reverse(self.append_chunk(*n)),
            Command::ByteSwap(n) => block::byte_swap(self.append_chunk(*n)),
            Command::Logical { op, count, pattern } => {
                block::mask(self.append_chunk(*count), *op, pattern)
            }
            Command::Block { chain, count } => {
                let chunk = self.append_chunk(*count);
                for op in chain {
                    trace.chain_step(pass, op);
                    op.apply(chunk);
                }
            }
        }
    }

    /// Copies up to `n` input bits to the output and returns the copy for in-place transforming.
    fn append_chunk(&mut self, n: usize) -> &mut [bool] {
        let start = self.output.len();
        self.output.extend_from_slice(self.cursor.take(n));
        &mut self.output[start..]
    }
}
