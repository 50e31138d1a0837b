//! Program: a scanned command list that can be applied to many inputs.

use std::{fmt, str::FromStr};

use crate::{
    bits::{pack_to_bits, unpack_from_bits},
    command::Command,
    engine::Engine,
    errors::{EditError, ProgramError},
    options::EditOptions,
    range::BitRange,
    scanner::Scanner,
    trace::{LogTrace, Trace},
};

/// A compiled program. Use [Program::compile] to scan text once, then
/// [Program::apply] to run it against any number of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    commands: Vec<Command>,
}

impl Program {
    /// Scans the whole of `text`. Fails on the first malformed command.
    pub fn compile(text: &str) -> Result<Self, ProgramError> {
        let commands = Scanner::new(text).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { commands })
    }

    /// Commands in program order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Runs the program over `input`, logging through `tracing` as
    /// `options.verbosity` asks.
    pub fn apply(&self, input: &[u8], options: &EditOptions) -> Result<Vec<u8>, EditError> {
        let mut trace = LogTrace::new(options.verbosity);
        self.apply_with(input, options, &mut trace)
    }

    /// Runs the program over `input`, reporting to `trace`.
    pub fn apply_with<T: Trace + ?Sized>(
        &self,
        input: &[u8],
        options: &EditOptions,
        trace: &mut T,
    ) -> Result<Vec<u8>, EditError> {
        let bits = pack_to_bits(input);
        let range = BitRange::resolve(options.start, options.end, bits.len())?;

        trace.begin(bits.len(), range);
        let output = Engine::new(&bits, range).run(&self.commands, trace)?;

        Ok(unpack_from_bits(&output))
    }
}

impl FromStr for Program {
    type Err = ProgramError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Program::compile(text)
    }
}

/// Renders the canonical program text, which compiles back to the same program.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
